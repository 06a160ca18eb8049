//! A股 T+1 判官
//!
//! 根据分时数据计算 VWAP（机构成本线），并按 T+1 规则给出
//! 涨停封死 / 绝对别买 / 别追高 / 低吸持股 四类判决。
//! 数据来源：东方财富

pub mod analysis;   // VWAP 与判决器（纯计算）
pub mod config;     // 配置加载
pub mod error;      // 错误类型
pub mod handlers;   // HTTP 请求处理器
pub mod middleware; // 中间件
pub mod models;     // 数据模型定义
pub mod services;   // 数据源与判决服务
