use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};

/// `/app/<rest>` moved to `/<rest>`; the query string is kept.
pub async fn strip_app_prefix(req: HttpRequest) -> HttpResponse {
    let tail = req.match_info().get("tail").unwrap_or_default();
    let mut location = format!("/{}", tail);
    if let Some(query) = req.uri().query() {
        location.push('?');
        location.push_str(query);
    }

    HttpResponse::PermanentRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}
