//! 判决结果模型

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::market::{IntradayInterval, Snapshot};

/// 累计 VWAP 序列中的一个点，与分时点一一对应
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VwapPoint {
    pub timestamp: NaiveDateTime,
    /// 该分钟收盘价，便于与 VWAP 叠加绘图
    pub price: f64,
    /// 截至该点的累计 VWAP；开盘前段累计成交量仍为 0 时为空
    #[serde(rename = "cumulativeVwap")]
    pub vwap: Option<f64>,
}

/// 判决等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// 涨停封死
    Locked,
    /// 水下，绝对别买
    NoTouch,
    /// 乖离过大，追高风险
    TrapRisk,
    /// 站稳均价线，可低吸/持股
    BuyHold,
}

/// 判决结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub label: String,
    pub severity: Severity,
    pub rationale: String,
    /// (现价 - VWAP) / VWAP * 100
    pub deviation_percent: f64,
    /// VWAP 下方 2% 的止损参考
    pub stop_loss_reference: f64,
    pub current_price: f64,
    pub vwap: f64,
}

/// 单次查询的完整输出，交给展示层渲染
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictReport {
    pub snapshot: Snapshot,
    pub interval: IntradayInterval,
    pub vwap_series: Vec<VwapPoint>,
    pub verdict: Verdict,
    /// 生成时间（北京时间）
    pub generated_at: String,
}
