use derive_more::derive::Display;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Hash, Eq, Display)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        ModelId(value)
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        ModelId(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged turn sent to the text generation service.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl ToString) -> Self {
        Self { role: Role::System, content: content.to_string() }
    }

    pub fn user(content: impl ToString) -> Self {
        Self { role: Role::User, content: content.to_string() }
    }
}

/// Request parameters accompanying a completion call.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Setters)]
#[setters(into)]
pub struct CompletionOptions {
    pub model: ModelId,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    pub fn new(model: impl Into<ModelId>) -> Self {
        Self { model: model.into(), temperature: 0.0, max_tokens: 10 }
    }
}
