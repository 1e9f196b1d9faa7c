use crate::connection::ConnectionState;
use crate::db::RatingRepository;
use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub database: ConnectionState,
}

#[get("")]
pub async fn health_check(repository: web::Data<Arc<dyn RatingRepository>>) -> HttpResponse {
    let status = HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        database: repository.connection_state(),
    };

    match status.database {
        ConnectionState::Connected => HttpResponse::Ok().json(status),
        _ => HttpResponse::ServiceUnavailable().json(status),
    }
}
