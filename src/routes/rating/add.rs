use crate::db::RatingRepository;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::post;
use actix_web::{web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

#[tracing::instrument(name = "Add rating.", skip(repository))]
#[post("")]
pub async fn add_handler(
    form: web::Json<forms::rating::Add>,
    repository: web::Data<Arc<dyn RatingRepository>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Rating>::build().form_error(errors.to_string()));
    }

    let rating = repository
        .create(form.into_inner().into())
        .await
        .map_err(|err| {
            tracing::error!("Failed to save rating: {:?}", err);
            err
        })?;

    Ok(JsonResponse::build()
        .set_id(rating.id.clone())
        .set_item(rating)
        .created("Saved"))
}
