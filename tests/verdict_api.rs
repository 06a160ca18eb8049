//! 判决接口的 HTTP 行为测试（使用本地桩数据源，不访问网络）

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use chrono::NaiveDate;
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use ashare_verdict::error::VerdictError;
use ashare_verdict::handlers;
use ashare_verdict::middleware::ApiKeyMiddleware;
use ashare_verdict::models::{IntradayInterval, IntradaySeries, Snapshot, Tick};
use ashare_verdict::services::{MarketDataProvider, VerdictService};

/// 固定返回：600519 正常，000001 停牌，其余代码不存在
struct FixtureProvider;

impl MarketDataProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn fetch_snapshot<'a>(&'a self, symbol: &'a str) -> BoxFuture<'a, Result<Snapshot, VerdictError>> {
        let result = match symbol {
            "600519" | "000001" => Ok(Snapshot {
                symbol: symbol.to_string(),
                display_name: "测试股票".to_string(),
                current_price: Some(105.0),
                day_high: Some(110.0),
                day_low: Some(98.0),
                change_percent: Some(5.0),
            }),
            _ => Err(VerdictError::NotFound {
                symbol: symbol.to_string(),
            }),
        };
        future::ready(result).boxed()
    }

    fn fetch_intraday<'a>(
        &'a self,
        symbol: &'a str,
        interval: IntradayInterval,
    ) -> BoxFuture<'a, Result<IntradaySeries, VerdictError>> {
        let result = if symbol == "000001" {
            Err(VerdictError::EmptyData {
                symbol: symbol.to_string(),
            })
        } else {
            let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            let ticks = vec![
                Tick::new(day.and_hms_opt(9, 30, 0).unwrap(), 99.0, 200.0),
                Tick::new(day.and_hms_opt(9, 31, 0).unwrap(), 101.0, 200.0),
            ];
            Ok(IntradaySeries::new(symbol, interval, ticks))
        };
        future::ready(result).boxed()
    }
}

macro_rules! app {
    ($api_key:expr) => {
        test::init_service(
            App::new()
                .wrap(ApiKeyMiddleware::new($api_key))
                .app_data(web::Data::new(VerdictService::new(Arc::new(FixtureProvider))))
                .app_data(web::Data::new(IntradayInterval::OneMinute))
                .configure(handlers::config),
        )
        .await
    };
}

#[actix_web::test]
async fn test_verdict_trap_risk() {
    let app = app!("");
    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/600519")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["verdict"]["severity"], "trapRisk");
    assert_eq!(body["data"]["verdict"]["vwap"], 100.0);
    assert_eq!(body["data"]["verdict"]["stopLossReference"], 98.0);
    assert_eq!(body["data"]["interval"], 1);
    let series = body["data"]["vwapSeries"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["cumulativeVwap"], 99.0);
    assert_eq!(series[1]["cumulativeVwap"], 100.0);
    assert_eq!(series[1]["price"], 101.0);
    assert_eq!(body["data"]["snapshot"]["displayName"], "测试股票");
}

#[actix_web::test]
async fn test_verdict_not_found() {
    let app = app!("");
    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/999999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_kind"], "not_found");
}

#[actix_web::test]
async fn test_verdict_halted_is_unprocessable() {
    let app = app!("");
    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/000001")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_kind"], "empty_data");
}

#[actix_web::test]
async fn test_verdict_period_parameter() {
    let app = app!("");
    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/600519?period=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["interval"], 5);

    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/600519?period=7")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

/// 非数字的周期参数同样返回统一响应结构
#[actix_web::test]
async fn test_verdict_malformed_period_uses_envelope() {
    let app = app!("");
    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/600519?period=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert!(body["message"].as_str().unwrap().contains("查询参数无效"));
}

#[actix_web::test]
async fn test_bearer_token_required_when_configured() {
    let app = app!("secret");

    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/600519")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/600519")
        .insert_header(("Authorization", "Bearer secret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

/// 只有健康检查路径本身免认证，其它以 /health 结尾的路径仍需 Token
#[actix_web::test]
async fn test_health_exemption_is_exact_path() {
    let app = app!("secret");

    let req = test::TestRequest::get()
        .uri("/api/v1/verdict/health")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}
