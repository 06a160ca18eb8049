//! 行情数据模型
//!
//! 定义单只股票的实时快照与分时序列，均为单次查询内的值对象

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 分时采样周期（分钟）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum IntradayInterval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
}

impl IntradayInterval {
    pub const fn minutes(self) -> u32 {
        match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::SixtyMinutes => 60,
        }
    }
}

impl Default for IntradayInterval {
    fn default() -> Self {
        Self::OneMinute
    }
}

impl From<IntradayInterval> for u32 {
    fn from(value: IntradayInterval) -> Self {
        value.minutes()
    }
}

impl TryFrom<u32> for IntradayInterval {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::OneMinute),
            5 => Ok(Self::FiveMinutes),
            15 => Ok(Self::FifteenMinutes),
            30 => Ok(Self::ThirtyMinutes),
            60 => Ok(Self::SixtyMinutes),
            other => Err(format!("不支持的分时周期 {}，可选 1, 5, 15, 30, 60", other)),
        }
    }
}

impl fmt::Display for IntradayInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.minutes())
    }
}

/// 单个分时点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// 分钟时间（交易所本地时间）
    pub timestamp: NaiveDateTime,
    /// 该分钟收盘价
    pub price: f64,
    /// 该分钟成交量（手）
    pub volume: f64,
}

impl Tick {
    pub fn new(timestamp: NaiveDateTime, price: f64, volume: f64) -> Self {
        Self {
            timestamp,
            price,
            volume,
        }
    }
}

/// 单个交易日的分时序列，按时间先后排列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradaySeries {
    pub symbol: String,
    pub interval: IntradayInterval,
    pub ticks: Vec<Tick>,
}

impl IntradaySeries {
    pub fn new(symbol: impl Into<String>, interval: IntradayInterval, ticks: Vec<Tick>) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            ticks,
        }
    }

    /// 空序列视为停牌或无数据
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }
}

/// 实时行情快照
///
/// 数值字段可能缺失（数据源对停牌股返回 "-"），
/// 由判决器决定缺失是否致命
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// 股票代码
    pub symbol: String,
    /// 股票名称
    pub display_name: String,
    /// 最新价
    pub current_price: Option<f64>,
    /// 当日最高
    pub day_high: Option<f64>,
    /// 当日最低
    pub day_low: Option<f64>,
    /// 涨跌幅（百分比）
    pub change_percent: Option<f64>,
}
