//! 纯计算模块
//!
//! VWAP 计算与判决器，不做任何 I/O

pub mod classifier;
pub mod vwap;

pub use classifier::{classify, classify_snapshot, Signal};
pub use vwap::{compute_vwap, cumulative_vwap, VwapSeries};
