//! 业务逻辑服务模块
//!
//! 封装数据获取和判决流程

pub mod eastmoney;       // 东方财富数据源
pub mod provider;        // 数据源接口
pub mod verdict_service; // 判决服务

pub use eastmoney::EastmoneyProvider;
pub use provider::MarketDataProvider;
pub use verdict_service::VerdictService;
