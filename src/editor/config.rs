//! Presentation settings for the source pane.

use super::state::TextTone;
use serde::{Deserialize, Serialize};

/// Configuration for a [`SourceEditor`](super::SourceEditor).
///
/// Supports partial overrides via `..Default::default()`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// Inline style applied to the text area
    pub edit_style: String,
    /// Width of the text area in characters
    pub columns: usize,
    /// Rows added below the last line of text
    pub extra_rows: usize,
    pub tones: ToneColors,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            edit_style: "font-family: monospace; font-size: 100%; min-width:60em; \
                         margin: 1em 0.2em 1em 0.2em; padding: 1em; \
                         border: 0.1em solid #888; border-radius: 0.5em;"
                .to_string(),
            columns: 80,
            extra_rows: 2,
            tones: ToneColors::default(),
        }
    }
}

impl EditorConfig {
    /// Rows for a text area showing `text`.
    pub fn rows_for(&self, text: &str) -> usize {
        text.split('\n').count() + self.extra_rows
    }
}

/// CSS colors for each [`TextTone`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToneColors {
    pub muted: String,
    pub normal: String,
    pub modified: String,
    pub rejected: String,
}

impl Default for ToneColors {
    fn default() -> Self {
        Self {
            muted: "#888".to_string(),
            normal: "black".to_string(),
            modified: "green".to_string(),
            rejected: "red".to_string(),
        }
    }
}

impl ToneColors {
    pub fn color(&self, tone: TextTone) -> &str {
        match tone {
            TextTone::Muted => &self.muted,
            TextTone::Normal => &self.normal,
            TextTone::Modified => &self.modified,
            TextTone::Rejected => &self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.columns, 80);
        assert!(config.edit_style.starts_with("font-family: monospace;"));
        assert_eq!(config.tones.color(TextTone::Rejected), "red");
    }

    #[test]
    fn test_rows_for() {
        let config = EditorConfig::default();
        assert_eq!(config.rows_for("one line"), 3);
        assert_eq!(config.rows_for("a\nb\nc\n"), 6);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: EditorConfig = serde_json::from_str(r#"{"columns": 120}"#).unwrap();
        assert_eq!(config.columns, 120);
        assert_eq!(config.extra_rows, 2);
        assert_eq!(config.tones.muted, "#888");
    }
}
