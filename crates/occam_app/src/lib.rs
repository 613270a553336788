mod evaluator;
mod extract;
mod fuzzy_judge;
mod prompt;
mod scenario_parser;

pub use evaluator::*;
pub use extract::{quoted_text, text_after_keyword};
pub use fuzzy_judge::*;
pub use scenario_parser::*;
