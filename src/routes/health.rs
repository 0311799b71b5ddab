use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Health check endpoint
///
/// Lives outside the authenticated `/api` scope so load balancers can probe
/// it without credentials.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "ticklist",
        "timestamp": Utc::now()
    }))
}
