//! A股 T+1 判官后端服务
//!
//! 提供单只股票 VWAP 判决的 RESTful API 服务
//! 数据来源：东方财富

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use ashare_verdict::config::AppConfig;
use ashare_verdict::handlers;
use ashare_verdict::middleware::ApiKeyMiddleware;
use ashare_verdict::services::{EastmoneyProvider, VerdictService};

/// 应用程序入口
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    // 配置文件里的日志级别只作默认值，RUST_LOG 优先
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match &config.source {
        Some(path) => log::info!("从 {} 加载配置成功", path),
        None => log::info!("未找到配置文件，使用默认配置"),
    }
    if config.api.api_key.is_empty() {
        log::warn!("未设置 API Key，接口不做认证");
    }

    let provider = EastmoneyProvider::new(&config.provider)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let service = web::Data::new(VerdictService::new(Arc::new(provider)));
    let interval = web::Data::new(config.provider.interval);
    let api_key = config.api.api_key.clone();

    log::info!(
        "启动 A股判官服务 {}，默认分时周期 {}",
        config.bind_addr(),
        config.provider.interval
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(ApiKeyMiddleware::new(&api_key))
            .wrap(Logger::default())
            .app_data(service.clone())
            .app_data(interval.clone())
            .configure(handlers::config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await
}
