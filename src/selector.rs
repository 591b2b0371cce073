//! Generation selector syntax: `3`, `1-4`, or `1,3,6`

use crate::resolver::ResolutionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationSelector {
    /// One of several generations, picked at random.
    List(Vec<String>),
    /// Every generation from `start` through `end`.
    Range { start: String, end: String },
    Single(String),
}

impl GenerationSelector {
    /// Shapes are checked in order: comma list, dash range, single label.
    /// Labels are not checked against any table here.
    pub fn parse(selector: &str) -> Result<Self, ResolutionError> {
        if selector.contains(',') {
            return Ok(Self::List(selector.split(',').map(str::to_string).collect()));
        }

        if selector.contains('-') {
            let parts: Vec<&str> = selector.split('-').collect();
            return match parts.as_slice() {
                [start, end] => Ok(Self::Range {
                    start: start.to_string(),
                    end: end.to_string(),
                }),
                _ => Err(ResolutionError::UnknownGeneration(selector.to_string())),
            };
        }

        Ok(Self::Single(selector.to_string()))
    }

    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::List(labels) => labels.iter().map(String::as_str).collect(),
            Self::Range { start, end } => vec![start.as_str(), end.as_str()],
            Self::Single(label) => vec![label.as_str()],
        }
    }
}
