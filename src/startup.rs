use crate::db::RatingRepository;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub fn run(
    listener: TcpListener,
    repository: Arc<dyn RatingRepository>,
) -> Result<Server, std::io::Error> {
    let repository = web::Data::new(repository);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match &err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Invalid JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            _ => err.to_string(),
        };
        let response =
            JsonResponse::<()>::build().response(http::StatusCode::BAD_REQUEST, &msg);
        error::InternalError::from_response(err, response).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::security_headers())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(web::resource("/app/{tail:.*}").to(routes::strip_app_prefix))
            .service(
                web::scope("/rating")
                    .service(routes::rating::recent_list_handler)
                    .service(routes::rating::package_summary_handler)
                    .service(routes::rating::public_package_list_handler)
                    .service(routes::rating::public_user_list_handler)
                    .service(routes::rating::public_get_handler)
                    .service(routes::rating::add_handler),
            )
            .service(
                web::scope("/admin").service(
                    web::scope("/rating")
                        .service(routes::rating::admin_package_list_handler)
                        .service(routes::rating::admin_get_handler)
                        .service(routes::rating::admin_approval_handler)
                        .service(routes::rating::admin_verification_handler),
                ),
            )
            .app_data(json_config.clone())
            .app_data(repository.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
