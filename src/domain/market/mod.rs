// Market data domain
pub mod time_series;

pub use time_series::{ClosingPrice, TimeSeries};
