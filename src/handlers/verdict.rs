//! 判决接口处理器
//!
//! - GET /verdict/{symbol}?period=1 - 获取单只股票的 T+1 判决

use actix_web::{
    error::{InternalError, QueryPayloadError},
    http::StatusCode,
    web, Error, HttpRequest, HttpResponse, Result,
};
use serde::Deserialize;

use crate::error::{ErrorKind, VerdictError};
use crate::models::{ApiResponse, IntradayInterval, VerdictReport};
use crate::services::VerdictService;

/// 判决查询参数
#[derive(Debug, Deserialize)]
pub struct VerdictQuery {
    /// 分时周期（分钟）：1, 5, 15, 30, 60
    pub period: Option<u32>,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::EmptyData => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ProviderError => StatusCode::BAD_GATEWAY,
        ErrorKind::DataError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 按错误类别生成面向用户的提示
fn user_message(err: &VerdictError) -> String {
    match err {
        VerdictError::NotFound { symbol } => {
            format!("找不到代码 {}，请输入6位数字 (如 600519)", symbol)
        }
        VerdictError::EmptyData { symbol } => format!("{} 分时数据为空 (可能是停牌)", symbol),
        VerdictError::Provider { message, .. } => format!("数据接口报错: {}", message),
        VerdictError::Data { source, .. } => format!("数据异常: {}", source),
    }
}

pub async fn get_verdict(
    service: web::Data<VerdictService>,
    default_interval: web::Data<IntradayInterval>,
    path: web::Path<String>,
    query: web::Query<VerdictQuery>,
) -> Result<HttpResponse> {
    let symbol = path.into_inner();

    let interval = match query.period {
        None => *default_interval.get_ref(),
        Some(minutes) => match IntradayInterval::try_from(minutes) {
            Ok(interval) => interval,
            Err(message) => {
                let response = ApiResponse::<VerdictReport>::error(message);
                return Ok(HttpResponse::BadRequest().json(response));
            }
        },
    };

    match service.evaluate(&symbol, interval).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(report))),
        Err(e) => {
            log::warn!("判决失败 [{:?}]: {}", e.kind(), e);
            let response = ApiResponse::<VerdictReport>::error_with_kind(e.kind(), user_message(&e));
            Ok(HttpResponse::build(status_for(e.kind())).json(response))
        }
    }
}

/// 查询参数解析失败时同样返回统一响应结构
fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("查询参数无效: {}", err);
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(message));
    InternalError::from_response(err, response).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/verdict/{symbol}", web::get().to(get_verdict));
}
