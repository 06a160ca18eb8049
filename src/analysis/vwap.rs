//! 累计 VWAP 计算
//!
//! `vwap[i] = Σ(price[0..=i] * volume[0..=i]) / Σ(volume[0..=i])`，
//! 单次正向遍历，只保留两个累加器

use crate::error::DataError;
use crate::models::{IntradaySeries, Tick, VwapPoint};

/// 计算结果：逐点 VWAP 序列与当前（最后一个点的）VWAP
#[derive(Debug, Clone, PartialEq)]
pub struct VwapSeries {
    pub points: Vec<VwapPoint>,
    pub current: f64,
}

/// 计算分时序列的累计 VWAP
pub fn compute_vwap(series: &IntradaySeries) -> Result<VwapSeries, DataError> {
    cumulative_vwap(&series.ticks)
}

/// 对按时间排列的分时点计算累计 VWAP
///
/// 开盘前段累计成交量为 0 的点 VWAP 为空；
/// 直到最后一个点累计成交量仍为 0 时返回 [`DataError::ZeroCumulativeVolume`]
pub fn cumulative_vwap(ticks: &[Tick]) -> Result<VwapSeries, DataError> {
    if ticks.is_empty() {
        return Err(DataError::EmptySeries);
    }

    let mut points = Vec::with_capacity(ticks.len());
    let mut turnover = 0.0_f64;
    let mut volume = 0.0_f64;

    for (index, tick) in ticks.iter().enumerate() {
        if !tick.price.is_finite() || tick.price <= 0.0 {
            return Err(DataError::InvalidPrice {
                index,
                price: tick.price,
            });
        }
        if !tick.volume.is_finite() || tick.volume < 0.0 {
            return Err(DataError::InvalidVolume {
                index,
                volume: tick.volume,
            });
        }

        turnover += tick.price * tick.volume;
        volume += tick.volume;

        points.push(VwapPoint {
            timestamp: tick.timestamp,
            price: tick.price,
            vwap: (volume > 0.0).then(|| turnover / volume),
        });
    }

    match points.last().and_then(|p| p.vwap) {
        Some(current) => Ok(VwapSeries { points, current }),
        None => Err(DataError::ZeroCumulativeVolume),
    }
}
