mod error;
mod evaluator_config;

pub use error::*;
pub use evaluator_config::*;
