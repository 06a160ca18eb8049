pub mod market;
pub mod response;
pub mod verdict;

pub use market::*;
pub use response::*;
pub use verdict::*;
