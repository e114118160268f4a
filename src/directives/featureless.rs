//! The Featureless directive: an explicit marker that a level grants
//! nothing new.

use std::fmt;

use serde::Serialize;

use crate::parser::Arguments;

use super::universal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Featureless {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
}

impl Featureless {
    pub(crate) fn new(line: usize, args: &Arguments) -> Self {
        let fields = universal("featureless", line, args);
        Self {
            id: fields.id,
            name: fields.name,
            comment: fields.comment,
        }
    }

    pub(crate) fn to_markdown(&self) -> String {
        "- Featureless\n".to_string()
    }
}

impl fmt::Display for Featureless {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Featureless")
    }
}
