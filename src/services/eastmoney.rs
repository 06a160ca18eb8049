//! 东方财富行情接口实现
//!
//! 对应 akshare 的 stock_zh_a_spot_em / stock_zh_a_hist_min_em
//!
//! - 实时快照: push2.eastmoney.com/api/qt/stock/get
//! - 1 分钟分时: push2his.eastmoney.com/api/qt/stock/trends2/get
//! - 5/15/30/60 分钟: push2his.eastmoney.com/api/qt/stock/kline/get

use std::time::Duration;

use chrono::NaiveDateTime;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde_json::Value;

use super::provider::MarketDataProvider;
use crate::config::ProviderConfig;
use crate::error::VerdictError;
use crate::models::{IntradayInterval, IntradaySeries, Snapshot, Tick};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REFERER: &str = "https://quote.eastmoney.com/";
const SNAPSHOT_UT: &str = "fa5fd1943c7b386f172d6893dbfba10b";
const KLINE_UT: &str = "7eea3edcaed734bea9cbfc24409ed989";
/// 快照字段：最新价、最高、最低、代码、名称、涨跌幅
const SNAPSHOT_FIELDS: &str = "f43,f44,f45,f57,f58,f170";
const ROW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// A 股每日连续竞价约 240 分钟
const SESSION_MINUTES: u32 = 240;

/// 东方财富行情数据源
pub struct EastmoneyProvider {
    client: Client,
    snapshot_url: String,
    trends_url: String,
    kline_url: String,
}

impl EastmoneyProvider {
    /// 按配置创建，请求与连接超时都有上限
    pub fn new(config: &ProviderConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            snapshot_url: config.snapshot_url.clone(),
            trends_url: config.trends_url.clone(),
            kline_url: config.kline_url.clone(),
        })
    }

    async fn get_json(
        &self,
        symbol: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, VerdictError> {
        log::debug!("📡 请求东方财富接口 {} symbol={}", url, symbol);

        let response = self
            .client
            .get(url)
            .query(query)
            .header("Referer", REFERER)
            .send()
            .await
            .map_err(|e| transport_error(symbol, e))?;

        if !response.status().is_success() {
            return Err(VerdictError::provider(
                symbol,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| transport_error(symbol, e))
    }

    async fn snapshot(&self, symbol: &str) -> Result<Snapshot, VerdictError> {
        let query = [
            ("secid", secid(symbol)),
            ("fltt", "2".to_string()),
            ("invt", "2".to_string()),
            ("ut", SNAPSHOT_UT.to_string()),
            ("fields", SNAPSHOT_FIELDS.to_string()),
        ];
        let body = self.get_json(symbol, &self.snapshot_url, &query).await?;
        parse_snapshot(&body, symbol)
    }

    async fn intraday(
        &self,
        symbol: &str,
        interval: IntradayInterval,
    ) -> Result<IntradaySeries, VerdictError> {
        match interval {
            IntradayInterval::OneMinute => {
                let query = [
                    ("secid", secid(symbol)),
                    ("fields1", "f1,f2,f3,f4,f5,f6,f7,f8,f9,f10,f11,f12,f13".to_string()),
                    ("fields2", "f51,f52,f53,f54,f55,f56,f57,f58".to_string()),
                    ("ut", SNAPSHOT_UT.to_string()),
                    ("ndays", "1".to_string()),
                    ("iscr", "0".to_string()),
                ];
                let body = self.get_json(symbol, &self.trends_url, &query).await?;
                parse_rows(&body, "trends", symbol, interval)
            }
            _ => {
                // 取两个交易日的量，解析时只保留最后一个交易日
                let limit = SESSION_MINUTES / interval.minutes() * 2;
                let query = [
                    ("secid", secid(symbol)),
                    ("klt", interval.minutes().to_string()),
                    ("fqt", "0".to_string()),
                    ("fields1", "f1,f2,f3,f4,f5,f6".to_string()),
                    ("fields2", "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61".to_string()),
                    ("ut", KLINE_UT.to_string()),
                    ("end", "20500101".to_string()),
                    ("lmt", limit.to_string()),
                ];
                let body = self.get_json(symbol, &self.kline_url, &query).await?;
                parse_rows(&body, "klines", symbol, interval)
            }
        }
    }
}

impl MarketDataProvider for EastmoneyProvider {
    fn name(&self) -> &'static str {
        "eastmoney"
    }

    fn fetch_snapshot<'a>(&'a self, symbol: &'a str) -> BoxFuture<'a, Result<Snapshot, VerdictError>> {
        self.snapshot(symbol).boxed()
    }

    fn fetch_intraday<'a>(
        &'a self,
        symbol: &'a str,
        interval: IntradayInterval,
    ) -> BoxFuture<'a, Result<IntradaySeries, VerdictError>> {
        self.intraday(symbol, interval).boxed()
    }
}

fn transport_error(symbol: &str, e: reqwest::Error) -> VerdictError {
    if e.is_timeout() {
        VerdictError::provider(symbol, "请求超时")
    } else {
        VerdictError::provider(symbol, e)
    }
}

/// 东方财富证券 ID：6/9 开头为沪市 (1.)，其余为深市/北交所 (0.)
pub fn secid(symbol: &str) -> String {
    match symbol.chars().next() {
        Some('6') | Some('9') => format!("1.{}", symbol),
        _ => format!("0.{}", symbol),
    }
}

/// 数值字段：接受数字或数字字符串，"-" 视为缺失
fn number_field(data: &Value, key: &str) -> Option<f64> {
    let value = match &data[key] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// 解析实时快照
fn parse_snapshot(body: &Value, symbol: &str) -> Result<Snapshot, VerdictError> {
    let data = &body["data"];
    if data.is_null() {
        return Err(VerdictError::NotFound {
            symbol: symbol.to_string(),
        });
    }
    if !data.is_object() {
        return Err(VerdictError::provider(symbol, "快照数据格式无效"));
    }

    Ok(Snapshot {
        symbol: data["f57"].as_str().unwrap_or(symbol).to_string(),
        display_name: data["f58"].as_str().unwrap_or_default().to_string(),
        current_price: number_field(data, "f43"),
        day_high: number_field(data, "f44"),
        day_low: number_field(data, "f45"),
        change_percent: number_field(data, "f170"),
    })
}

/// 解析分时 / K 线行，只保留最后一个交易日
///
/// 行格式: "2024-01-02 09:31,开盘,收盘,最高,最低,成交量,成交额,..."
fn parse_rows(
    body: &Value,
    key: &str,
    symbol: &str,
    interval: IntradayInterval,
) -> Result<IntradaySeries, VerdictError> {
    let rows = match body["data"][key].as_array() {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            return Err(VerdictError::EmptyData {
                symbol: symbol.to_string(),
            })
        }
    };

    let mut ticks = rows
        .iter()
        .map(|row| {
            row.as_str()
                .ok_or_else(|| VerdictError::provider(symbol, "分时行不是字符串"))
                .and_then(|row| parse_row(row, symbol))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(session) = ticks.last().map(|t| t.timestamp.date()) {
        ticks.retain(|t| t.timestamp.date() == session);
    }
    log::debug!("📈 {} 解析到 {} 个 {} 分时点", symbol, ticks.len(), interval);

    Ok(IntradaySeries::new(symbol, interval, ticks))
}

fn parse_row(row: &str, symbol: &str) -> Result<Tick, VerdictError> {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() < 6 {
        return Err(VerdictError::provider(symbol, format!("分时行字段不足: {}", row)));
    }

    let timestamp = NaiveDateTime::parse_from_str(fields[0], ROW_TIME_FORMAT)
        .map_err(|e| VerdictError::provider(symbol, format!("时间格式无效 {}: {}", fields[0], e)))?;
    let price = fields[2]
        .parse::<f64>()
        .map_err(|e| VerdictError::provider(symbol, format!("收盘价无效 {}: {}", fields[2], e)))?;
    let volume = fields[5]
        .parse::<f64>()
        .map_err(|e| VerdictError::provider(symbol, format!("成交量无效 {}: {}", fields[5], e)))?;

    Ok(Tick::new(timestamp, price, volume))
}
