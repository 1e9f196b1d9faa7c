use crate::db::RatingRepository;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{put, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Admin moderate rating.", skip(repository))]
#[put("/{id}/approval")]
pub async fn admin_approval_handler(
    path: web::Path<(String,)>,
    form: web::Json<forms::rating::Approval>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;
    let form = form.into_inner();
    let rating = repository
        .set_approval(&id, form.is_approved, form.admin_response)
        .await?;

    tracing::info!("Rating {} approval set to {}", id, rating.is_approved);
    Ok(JsonResponse::build()
        .set_item(Into::<views::rating::Admin>::into(rating))
        .ok("Updated"))
}

#[tracing::instrument(name = "Admin verify rating.", skip(repository))]
#[put("/{id}/verification")]
pub async fn admin_verification_handler(
    path: web::Path<(String,)>,
    form: web::Json<forms::rating::Verification>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;
    let rating = repository.set_verified(&id, form.is_verified).await?;

    Ok(JsonResponse::build()
        .set_item(Into::<views::rating::Admin>::into(rating))
        .ok("Updated"))
}
