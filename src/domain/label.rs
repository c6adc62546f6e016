use serde::{Deserialize, Serialize};

/// A named, optionally colored tag attachable to tasks by name.
///
/// Names are unique within a board, compared case-insensitively. The color
/// is an opaque token; a leading `#`, `rgb(`, or `hsl(` marks it a color
/// literal for exact-match search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Label {
    pub fn new(name: String) -> Self {
        Self { name, color: None }
    }

    pub fn with_color(mut self, color: String) -> Self {
        self.color = Some(color);
        self
    }
}

/// Partial label update; absent fields are preserved
#[derive(Debug, Clone, Default)]
pub struct LabelPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}
