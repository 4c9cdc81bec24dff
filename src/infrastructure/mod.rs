pub mod alpaca;
pub mod core;
pub mod ml;
pub mod mock;
pub mod persistence;

pub use alpaca::AlpacaMarketDataProvider;
pub use ml::OnnxPriceModel;
