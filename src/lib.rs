pub mod config;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod receipt;
pub mod scoring;
pub mod sku;
pub mod validation;
