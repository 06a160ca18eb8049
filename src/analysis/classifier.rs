//! T+1 判决器
//!
//! 按固定优先级依次匹配规则，先命中者胜出。
//! 各类别在数值上并不互斥（例如涨停时乖离率往往也超过 4%），
//! 因此规则顺序本身就是语义的一部分。

use crate::error::DataError;
use crate::models::{Severity, Snapshot, Verdict};

/// 涨停判定阈值（涨跌幅 %）。交易所上限为 10%，留出展示截断的容差
pub const LIMIT_UP_THRESHOLD: f64 = 9.8;
/// 追高判定阈值（乖离率 %）
pub const TRAP_DEVIATION_THRESHOLD: f64 = 4.0;
/// 止损参考 = VWAP * STOP_LOSS_RATIO
pub const STOP_LOSS_RATIO: f64 = 0.98;

/// 判决所需的全部输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub current_price: f64,
    pub day_high: f64,
    pub change_percent: f64,
    pub vwap: f64,
}

impl Signal {
    pub fn new(current_price: f64, day_high: f64, change_percent: f64, vwap: f64) -> Self {
        Self {
            current_price,
            day_high,
            change_percent,
            vwap,
        }
    }

    /// 从快照中取出必需字段，缺失任一字段即报错
    pub fn from_snapshot(snapshot: &Snapshot, vwap: f64) -> Result<Self, DataError> {
        let current_price = snapshot
            .current_price
            .ok_or(DataError::MissingField { field: "currentPrice" })?;
        let day_high = snapshot
            .day_high
            .ok_or(DataError::MissingField { field: "dayHigh" })?;
        let change_percent = snapshot
            .change_percent
            .ok_or(DataError::MissingField { field: "changePercent" })?;

        Ok(Self::new(current_price, day_high, change_percent, vwap))
    }

    /// 乖离率（%）
    pub fn deviation(&self) -> f64 {
        (self.current_price - self.vwap) / self.vwap * 100.0
    }
}

struct Rule {
    severity: Severity,
    applies: fn(&Signal, f64) -> bool,
}

/// 有序规则表，未命中任何规则时落到 BuyHold
const RULES: &[Rule] = &[
    Rule {
        severity: Severity::Locked,
        applies: |s, _| s.change_percent > LIMIT_UP_THRESHOLD && s.current_price == s.day_high,
    },
    Rule {
        severity: Severity::NoTouch,
        applies: |s, _| s.current_price < s.vwap,
    },
    Rule {
        severity: Severity::TrapRisk,
        applies: |_, deviation| deviation > TRAP_DEVIATION_THRESHOLD,
    },
];

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Locked => "涨停封死 (LOCKED)",
            Self::NoTouch => "绝对别买 (NO TOUCH)",
            Self::TrapRisk => "别追高 (TRAP RISK)",
            Self::BuyHold => "低吸/持股 (BUY/HOLD)",
        }
    }

    fn rationale(self, deviation: f64) -> String {
        match self {
            Self::Locked => {
                "价格顶在涨停板上，这一笔已经买不进去。场外不必排队，场内持有即可。".to_string()
            }
            Self::NoTouch => {
                "现价低于成交量加权成本线。T+1 下当天无法卖出，水下买入连止损的机会都没有。"
                    .to_string()
            }
            Self::TrapRisk => format!(
                "乖离率 {:.2}% 偏高，价格远离机构成本，午后回落容易被套在高位。",
                deviation
            ),
            Self::BuyHold => {
                "价格站稳均价线且未明显偏离，资金控盘，适合在均线附近低吸或持股。".to_string()
            }
        }
    }
}

/// 对给定输入做出判决
pub fn classify(signal: &Signal) -> Result<Verdict, DataError> {
    if !signal.vwap.is_finite() || signal.vwap == 0.0 {
        return Err(DataError::ZeroVwap { value: signal.vwap });
    }

    let deviation = signal.deviation();
    let severity = RULES
        .iter()
        .find(|rule| (rule.applies)(signal, deviation))
        .map_or(Severity::BuyHold, |rule| rule.severity);

    Ok(Verdict {
        label: severity.label().to_string(),
        severity,
        rationale: severity.rationale(deviation),
        deviation_percent: deviation,
        stop_loss_reference: signal.vwap * STOP_LOSS_RATIO,
        current_price: signal.current_price,
        vwap: signal.vwap,
    })
}

/// 对快照和当前 VWAP 做出判决
pub fn classify_snapshot(snapshot: &Snapshot, vwap: f64) -> Result<Verdict, DataError> {
    classify(&Signal::from_snapshot(snapshot, vwap)?)
}
