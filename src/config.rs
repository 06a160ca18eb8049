//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，缺省字段使用默认值

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::IntradayInterval;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// API 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API Key（为空则不启用认证）
    #[serde(default)]
    pub api_key: String,
}

/// 行情数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// 实时快照接口
    #[serde(default = "default_snapshot_url")]
    pub snapshot_url: String,
    /// 1 分钟分时接口
    #[serde(default = "default_trends_url")]
    pub trends_url: String,
    /// 多分钟 K 线接口
    #[serde(default = "default_kline_url")]
    pub kline_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 默认分时周期（分钟）
    #[serde(default)]
    pub interval: IntradayInterval,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// 配置文件路径，使用默认配置时为空
    #[serde(skip)]
    pub source: Option<String>,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_timeout() -> u64 { 10 }
fn default_connect_timeout() -> u64 { 5 }
fn default_log_level() -> String { "info".to_string() }
fn default_snapshot_url() -> String { "https://push2.eastmoney.com/api/qt/stock/get".to_string() }
fn default_trends_url() -> String { "https://push2his.eastmoney.com/api/qt/stock/trends2/get".to_string() }
fn default_kline_url() -> String { "https://push2his.eastmoney.com/api/qt/stock/kline/get".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            snapshot_url: default_snapshot_url(),
            trends_url: default_trends_url(),
            kline_url: default_kline_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            interval: IntradayInterval::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// 加载配置：依次查找 config.json、config/config.json，都不存在时使用默认值；
    /// 文件存在但解析失败时报错。环境变量 API_KEY 覆盖文件中的 api_key
    pub fn load() -> anyhow::Result<Self> {
        let config_paths = ["config.json", "config/config.json"];

        let mut config = match config_paths.iter().find(|path| Path::new(path).exists()) {
            Some(path) => {
                let mut config = Self::from_file(path)
                    .map_err(|e| anyhow::anyhow!("加载配置文件 {} 失败: {}", path, e))?;
                config.source = Some(path.to_string());
                config
            }
            None => Self::default(),
        };

        if let Ok(key) = std::env::var("API_KEY") {
            config.api.api_key = key;
        }

        Ok(config)
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
