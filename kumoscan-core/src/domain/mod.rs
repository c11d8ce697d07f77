//! Domain types: candles and timeframes.

pub mod candle;
pub mod timeframe;

pub use candle::Candle;
pub use timeframe::Timeframe;
