//! 判决服务
//!
//! 单次查询：获取快照 → 获取分时 → 计算 VWAP → 判决。
//! 查询之间不共享任何可变状态，数据源只读共享

use std::sync::Arc;

use super::provider::MarketDataProvider;
use crate::analysis::{classify_snapshot, compute_vwap};
use crate::error::VerdictError;
use crate::models::{beijing_now, IntradayInterval, VerdictReport};

/// 判决服务
#[derive(Clone)]
pub struct VerdictService {
    provider: Arc<dyn MarketDataProvider>,
}

impl VerdictService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// 对单只股票做出判决
    ///
    /// 任何一步失败都原样返回，不重试、不降级
    pub async fn evaluate(
        &self,
        symbol: &str,
        interval: IntradayInterval,
    ) -> Result<VerdictReport, VerdictError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(VerdictError::NotFound {
                symbol: String::new(),
            });
        }

        let snapshot = self.provider.fetch_snapshot(symbol).await?;
        let series = self.provider.fetch_intraday(symbol, interval).await?;
        if series.is_empty() {
            return Err(VerdictError::EmptyData {
                symbol: symbol.to_string(),
            });
        }

        let vwap = compute_vwap(&series).map_err(|e| VerdictError::data(symbol, e))?;
        let verdict = classify_snapshot(&snapshot, vwap.current)
            .map_err(|e| VerdictError::data(symbol, e))?;

        log::info!(
            "{} ({}) 现价 {:.2} VWAP {:.2} 乖离 {:.2}% -> {:?}",
            snapshot.display_name,
            symbol,
            verdict.current_price,
            verdict.vwap,
            verdict.deviation_percent,
            verdict.severity
        );

        Ok(VerdictReport {
            snapshot,
            interval,
            vwap_series: vwap.points,
            verdict,
            generated_at: beijing_now(),
        })
    }
}
