pub mod prediction_history_repository;

pub use prediction_history_repository::SqlitePredictionHistoryRepository;
