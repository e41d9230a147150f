//! Configuration options for selection conversion

use url::Url;

use crate::Result;

/// Class names used to pick apart a multiple-choice widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOptions {
    /// Class carried by each option row
    pub option_row_class: String,

    /// Class of the short key label inside a row, e.g. "(a)"
    pub key_class: String,

    /// Class of the answer body inside a row. Falls back to the row's `label`.
    pub answer_class: String,
}

impl Default for ChoiceOptions {
    fn default() -> Self {
        Self {
            option_row_class: "form-check".to_string(),
            key_class: "pl-multiple-choice-key-label".to_string(),
            answer_class: "pl-multiple-choice-answer".to_string(),
        }
    }
}

/// Options for [`crate::ConvertService`]
#[derive(Debug, Clone)]
pub struct Options {
    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Horizontal rule string
    pub hr: String,

    /// Minimum fence for fenced code blocks
    pub fence: String,

    /// Base used to make link and image destinations absolute
    pub base_url: Option<Url>,

    /// Escape `*`, `_` and backticks in text outside math and generated markup
    pub escape: bool,

    /// Multiple-choice widget recognition
    pub choice: ChoiceOptions,
}

impl Options {
    /// Set the base URL from a string, validating it
    pub fn with_base_url(mut self, base: &str) -> Result<Self> {
        self.base_url = Some(Url::parse(base)?);
        Ok(self)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bullet_list_marker: '-',
            em_delimiter: '*',
            strong_delimiter: "**".to_string(),
            hr: "---".to_string(),
            fence: "```".to_string(),
            base_url: None,
            escape: true,
            choice: ChoiceOptions::default(),
        }
    }
}
