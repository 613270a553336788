use std::path::Path;

use config::{Config, Environment, File};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

/// Settings shared by every judgment call the criterion evaluator makes.
#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[setters(into)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Model selector forwarded to the text generation service
    pub model: String,

    /// Sampling temperature; zero keeps judgments as repeatable as the
    /// provider allows
    pub temperature: f32,

    /// Output budget for the yes/no existence check and the 0.0-1.0 rating
    pub max_tokens: u32,

    /// Output budget for the fuzzy grading prompt, which explains itself
    /// before concluding
    pub fuzzy_match_max_tokens: u32,

    /// Number of leading characters of page content compared by the fuzzy
    /// judge
    pub content_match_chars: usize,

    /// Number of leading characters of page content embedded in the existence
    /// and open-ended judgment prompts
    pub judgment_content_chars: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            model: "auto".to_string(),
            temperature: 0.0,
            max_tokens: 10,
            fuzzy_match_max_tokens: 768,
            content_match_chars: 2000,
            judgment_content_chars: 1500,
        }
    }
}

impl EvaluatorConfig {
    const ENV_PREFIX: &'static str = "OCCAM";

    /// Reads the configuration by layering, from lowest to highest priority,
    /// the built-in defaults, the optional TOML file at `path` and `OCCAM_*`
    /// environment variables (a `.env` file in the working directory is loaded
    /// first).
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given but does not exist, or if any layer
    /// cannot be parsed into a valid configuration.
    pub fn read(path: Option<&Path>) -> Result<Self, Error> {
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded .env file");
        }
        Self::read_with(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(Self::ENV_PREFIX).try_parsing(true)
    }

    fn read_with(path: Option<&Path>, environment: Environment) -> Result<Self, Error> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::MissingFile(path.to_path_buf()));
            }
            debug!(path = %path.display(), "Reading evaluator configuration");
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}
