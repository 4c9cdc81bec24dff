// Market data domain
pub mod market;

// Scaling + windowing for model input
pub mod ml;

// Signal and advice derivation
pub mod advisory;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Domain-specific error types
pub mod errors;
