pub mod onnx_model;

pub use onnx_model::OnnxPriceModel;
