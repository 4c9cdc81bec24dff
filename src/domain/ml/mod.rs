pub mod scaling;
pub mod window;

pub use scaling::ScalingParams;
pub use window::{PredictionWindow, DEFAULT_WINDOW_SIZE};
