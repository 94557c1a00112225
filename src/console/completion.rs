//! Tab-completion results returned by console commands

use serde::Serialize;

/// Suggestions for the argument being typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub options: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CompletionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_hint_options(options: impl IntoIterator<Item = String>, hint: impl Into<String>) -> Self {
        Self {
            options: options.into_iter().collect(),
            hint: Some(hint.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.hint.is_none()
    }
}
