//! 错误类型
//!
//! 单次查询内的所有失败都以带标签的错误值返回给调用方，
//! 核心层不做重试、不吞错，也不拼装展示文案。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 数据不变量被破坏时的错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    /// 分时序列为空
    #[error("分时序列为空")]
    EmptySeries,
    /// 截至最后一个点累计成交量仍为 0
    #[error("累计成交量为 0，无法计算 VWAP")]
    ZeroCumulativeVolume,
    /// VWAP 为 0 或非有限值
    #[error("VWAP 无效: {value}")]
    ZeroVwap { value: f64 },
    /// 快照缺少必需字段
    #[error("快照缺少字段: {field}")]
    MissingField { field: &'static str },
    /// 第 index 个点的价格非正或非有限
    #[error("第 {index} 个分时点价格无效: {price}")]
    InvalidPrice { index: usize, price: f64 },
    /// 第 index 个点的成交量为负或非有限
    #[error("第 {index} 个分时点成交量无效: {volume}")]
    InvalidVolume { index: usize, volume: f64 },
}

/// 单次判决查询的错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VerdictError {
    /// 数据源不认识该代码
    #[error("找不到代码 {symbol}")]
    NotFound { symbol: String },
    /// 停牌或无分时数据
    #[error("{symbol} 分时数据为空")]
    EmptyData { symbol: String },
    /// 网络、传输或解析失败
    #[error("{symbol} 数据接口报错: {message}")]
    Provider { symbol: String, message: String },
    /// 内部数据不变量被破坏
    #[error("{symbol} 数据异常: {source}")]
    Data {
        symbol: String,
        #[source]
        source: DataError,
    },
}

/// 错误类别标签，供外层按类别渲染
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    EmptyData,
    ProviderError,
    DataError,
}

impl VerdictError {
    pub fn provider(symbol: impl Into<String>, message: impl ToString) -> Self {
        Self::Provider {
            symbol: symbol.into(),
            message: message.to_string(),
        }
    }

    pub fn data(symbol: impl Into<String>, source: DataError) -> Self {
        Self::Data {
            symbol: symbol.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::EmptyData { .. } => ErrorKind::EmptyData,
            Self::Provider { .. } => ErrorKind::ProviderError,
            Self::Data { .. } => ErrorKind::DataError,
        }
    }

    /// 出错的代码
    pub fn symbol(&self) -> &str {
        match self {
            Self::NotFound { symbol }
            | Self::EmptyData { symbol }
            | Self::Provider { symbol, .. }
            | Self::Data { symbol, .. } => symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_kind_tags() {
        let err = VerdictError::provider("600519", "timed out");
        assert_eq!(err.kind(), ErrorKind::ProviderError);
        assert_eq!(err.symbol(), "600519");
        assert_eq!(
            serde_json::to_string(&err.kind()).unwrap(),
            "\"provider_error\""
        );
    }

    /// 数据不变量错误同样携带代码与底层原因
    #[test]
    fn test_data_error_keeps_symbol_and_source() {
        let err = VerdictError::data("600519", DataError::ZeroCumulativeVolume);
        assert_eq!(err.kind(), ErrorKind::DataError);
        assert_eq!(err.symbol(), "600519");
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some(DataError::ZeroCumulativeVolume.to_string())
        );
        assert!(err.to_string().starts_with("600519"));
        assert_eq!(
            serde_json::to_string(&err.kind()).unwrap(),
            "\"data_error\""
        );
    }
}
