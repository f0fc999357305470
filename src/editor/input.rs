//! Editable-field configuration.
//!
//! The session never builds widgets itself; it asks an [`InputFactory`] for
//! a description of the field and the DOM layer turns that into an element.

use serde::{Deserialize, Serialize};

/// Class that marks inputs whose key presses drive navigation.
pub const DETECT_KEYS_CLASS: &str = "detect-keys";

/// Size limits of the default text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputConfig {
    pub size: u32,
    pub max_length: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            size: 3,
            max_length: 3,
        }
    }
}

/// Description of an editable field for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSpec {
    pub value: String,
    /// Form field name; the cell's element id.
    pub name: String,
    pub size: u32,
    pub max_length: u32,
    pub class: String,
}

/// Produces the editable field shown when a cell enters edit mode.
pub trait InputFactory {
    fn create_input(&self, value: &str, name: &str) -> InputSpec;
}

/// Plain `<input type="text">` sized by an [`InputConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputFactory {
    pub config: InputConfig,
}

impl TextInputFactory {
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }
}

impl InputFactory for TextInputFactory {
    fn create_input(&self, value: &str, name: &str) -> InputSpec {
        InputSpec {
            value: value.to_string(),
            name: name.to_string(),
            size: self.config.size,
            max_length: self.config.max_length,
            class: DETECT_KEYS_CLASS.to_string(),
        }
    }
}

impl<F> InputFactory for F
where
    F: Fn(&str, &str) -> InputSpec,
{
    fn create_input(&self, value: &str, name: &str) -> InputSpec {
        self(value, name)
    }
}
