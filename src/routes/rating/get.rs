use crate::db::{ListOptions, RatingRepository};
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use serde::Deserialize;
use std::convert::Into;
use std::sync::Arc;

const DEFAULT_RECENT_LIMIT: usize = 10;
const MAX_RECENT_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[tracing::instrument(name = "Public get rating.", skip(repository))]
#[get("/{id}")]
pub async fn public_get_handler(
    path: web::Path<(String,)>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;
    let rating = repository
        .get(&id)
        .await?
        .filter(|rating| rating.is_approved)
        .ok_or_else(|| JsonResponse::<views::rating::Public>::build().not_found("not found"))?;

    Ok(JsonResponse::build()
        .set_item(Into::<views::rating::Public>::into(rating))
        .ok("OK"))
}

#[tracing::instrument(name = "Public list of package ratings.", skip(repository))]
#[get("/package/{package_id}")]
pub async fn public_package_list_handler(
    path: web::Path<(String,)>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let package_id = path.into_inner().0;
    let ratings = repository
        .list_by_package(&package_id, ListOptions::approved_only())
        .await?
        .into_iter()
        .map(Into::into)
        .collect::<Vec<views::rating::Public>>();

    Ok(JsonResponse::build().set_list(ratings).ok("OK"))
}

#[tracing::instrument(name = "Package rating summary.", skip(repository))]
#[get("/package/{package_id}/summary")]
pub async fn package_summary_handler(
    path: web::Path<(String,)>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let package_id = path.into_inner().0;
    let summary = repository.package_summary(&package_id).await?;

    Ok(JsonResponse::<models::PackageSummary>::build()
        .set_item(summary)
        .ok("OK"))
}

#[tracing::instrument(name = "Public list of user ratings.", skip(repository))]
#[get("/user/{user_id}")]
pub async fn public_user_list_handler(
    path: web::Path<(String,)>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let user_id = path.into_inner().0;
    let ratings = repository
        .list_by_user(&user_id)
        .await?
        .into_iter()
        .filter(|rating| rating.is_approved)
        .map(Into::into)
        .collect::<Vec<views::rating::Public>>();

    Ok(JsonResponse::build().set_list(ratings).ok("OK"))
}

#[tracing::instrument(name = "Recent ratings.", skip(repository))]
#[get("/recent")]
pub async fn recent_list_handler(
    query: web::Query<RecentQuery>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);
    let ratings = repository
        .list_recent(limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect::<Vec<views::rating::Public>>();

    Ok(JsonResponse::build().set_list(ratings).ok("OK"))
}

#[tracing::instrument(name = "Admin get rating.", skip(repository))]
#[get("/{id}")]
pub async fn admin_get_handler(
    path: web::Path<(String,)>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;
    let rating = repository
        .get(&id)
        .await?
        .ok_or_else(|| JsonResponse::<views::rating::Admin>::build().not_found("not found"))?;

    Ok(JsonResponse::build()
        .set_item(Into::<views::rating::Admin>::into(rating))
        .ok("OK"))
}

#[tracing::instrument(name = "Admin list of package ratings.", skip(repository))]
#[get("/package/{package_id}")]
pub async fn admin_package_list_handler(
    path: web::Path<(String,)>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let package_id = path.into_inner().0;
    let ratings = repository
        .list_by_package(&package_id, ListOptions::default())
        .await?
        .into_iter()
        .map(Into::into)
        .collect::<Vec<views::rating::Admin>>();

    Ok(JsonResponse::build().set_list(ratings).ok("OK"))
}
