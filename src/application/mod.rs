// Model invocation
pub mod predictor;

// Request orchestration
pub mod orchestrator;
