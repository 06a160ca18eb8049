use actix_web::{web, HttpResponse, Result};
use crate::models::ApiResponse;
use crate::services::VerdictService;

pub async fn health_check(service: web::Data<VerdictService>) -> Result<HttpResponse> {
    let message = format!("Service is healthy, provider: {}", service.provider_name());
    Ok(HttpResponse::Ok().json(ApiResponse::success(message)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
