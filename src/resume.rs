//! Resume data: served as-is on `/api/resume` and embedded in the chat
//! system prompt.

use std::path::Path;

use serde_json::Value;

const EMBEDDED_RESUME: &str = include_str!("../data/resume.json");

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("parse resume JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("resume must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Clone)]
pub struct Resume {
    data: Value,
    system_prompt: String,
}

impl Resume {
    /// The resume compiled into the binary.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded file is not a JSON object.
    pub fn embedded() -> Result<Self, ResumeError> {
        Self::from_json(EMBEDDED_RESUME)
    }

    /// Load from `path`, or the embedded copy when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load(path: Option<&Path>) -> Result<Self, ResumeError> {
        let Some(path) = path else {
            return Self::embedded();
        };
        let text = std::fs::read_to_string(path)
            .map_err(|source| ResumeError::Read { path: path.display().to_string(), source })?;
        Self::from_json(&text)
    }

    /// # Errors
    ///
    /// Returns an error if `text` is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self, ResumeError> {
        let data: Value = serde_json::from_str(text)?;
        if !data.is_object() {
            return Err(ResumeError::NotAnObject);
        }
        let system_prompt = build_system_prompt(&data);
        Ok(Self { data, system_prompt })
    }

    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Person named in `personal.name`, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.data.pointer("/personal/name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

fn build_system_prompt(data: &Value) -> String {
    let owner = data
        .pointer("/personal/name")
        .and_then(Value::as_str)
        .unwrap_or("the site owner");
    // `Value`'s Display is the compact form.
    format!(
        "You are an AI assistant on {owner}'s portfolio. Answer only from this resume data. \
         Be concise (2-3 sentences). Use markdown for lists.\n\nDATA:{data}\n"
    )
}

#[cfg(test)]
#[path = "resume_test.rs"]
mod tests;
