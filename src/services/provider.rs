//! 行情数据源接口
//!
//! 核心只依赖这一组接口，具体数据源（东方财富等）在外部实现

use futures::future::BoxFuture;

use crate::error::VerdictError;
use crate::models::{IntradayInterval, IntradaySeries, Snapshot};

/// 行情数据源
///
/// 实现方负责把各自的失败归入 [`VerdictError`] 的
/// `NotFound` / `EmptyData` / `Provider` 三类
pub trait MarketDataProvider: Send + Sync {
    /// 数据源名称，用于日志
    fn name(&self) -> &'static str;

    /// 获取实时快照；代码不存在时返回 `NotFound`
    fn fetch_snapshot<'a>(&'a self, symbol: &'a str) -> BoxFuture<'a, Result<Snapshot, VerdictError>>;

    /// 获取当日分时序列；无数据（停牌）时返回 `EmptyData`
    fn fetch_intraday<'a>(
        &'a self,
        symbol: &'a str,
        interval: IntradayInterval,
    ) -> BoxFuture<'a, Result<IntradaySeries, VerdictError>>;
}
