//! Batch edit scripts: a JSON list of range writes applied in order.

use serde::{Deserialize, Serialize};

use crate::animation::{Category, MAX_CODE};
use crate::segment::{EditorError, ExpressionEditor, RangeWrite};

/// Expression given either as a numeric code or a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpressionValue {
    Code(u8),
    Label(String),
}

impl ExpressionValue {
    /// Resolve to a code for `category`.
    pub fn code(&self, category: Category) -> Option<u8> {
        match self {
            ExpressionValue::Code(code) => (*code <= MAX_CODE).then_some(*code),
            ExpressionValue::Label(label) => category.parse_code(label),
        }
    }
}

/// One edit in a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEdit {
    pub category: Category,
    pub start: i64,
    pub end: i64,
    pub expression: ExpressionValue,
}

/// Ordered list of edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    pub edits: Vec<ScriptEdit>,
}

/// Script entries that cannot be turned into range writes.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Edit {index}: '{value}' is not a valid {category} expression")]
    UnknownExpression {
        index: usize,
        category: Category,
        value: String,
    },
}

impl EditScript {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve every entry, failing on the first unknown expression.
    pub fn resolve(&self) -> Result<Vec<RangeWrite>, ScriptError> {
        self.edits
            .iter()
            .enumerate()
            .map(|(index, edit)| {
                let code = edit.expression.code(edit.category).ok_or_else(|| {
                    ScriptError::UnknownExpression {
                        index,
                        category: edit.category,
                        value: match &edit.expression {
                            ExpressionValue::Code(code) => code.to_string(),
                            ExpressionValue::Label(label) => label.clone(),
                        },
                    }
                })?;
                Ok(RangeWrite::new(edit.category, edit.start, edit.end, code))
            })
            .collect()
    }

    /// Apply the script to a loaded editor, stopping at the first failure.
    ///
    /// Returns the number of edits applied.
    pub fn apply(&self, editor: &mut ExpressionEditor) -> Result<usize, EditorError> {
        let writes = self.resolve()?;
        for write in &writes {
            editor.apply_range_write(write)?;
        }
        Ok(writes.len())
    }

    /// Script shown by `--example`.
    pub fn example() -> Self {
        Self {
            edits: vec![
                ScriptEdit {
                    category: Category::Eye,
                    start: 0,
                    end: 9,
                    expression: ExpressionValue::Label("OPEN".into()),
                },
                ScriptEdit {
                    category: Category::Eye,
                    start: 10,
                    end: 12,
                    expression: ExpressionValue::Label("CLOSED".into()),
                },
                ScriptEdit {
                    category: Category::Mouth,
                    start: 4,
                    end: 12,
                    expression: ExpressionValue::Code(4),
                },
            ],
        }
    }
}
