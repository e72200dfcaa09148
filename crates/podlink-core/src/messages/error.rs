use std::fmt;

use thiserror::Error;

use crate::Status;
use crate::model::ValueError;

/// Model entity a decoder tried to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    CurrentSet,
    CurrentPreset,
    Item { id: u32 },
    ItemParam { item: u32, param: u32 },
    Cab { id: usize },
    CabParam { cab: usize, param: u32 },
    PresetParam { id: u32 },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::CurrentSet => write!(f, "current set"),
            Target::CurrentPreset => write!(f, "current preset"),
            Target::Item { id } => write!(f, "item {id}"),
            Target::ItemParam { item, param } => write!(f, "parameter {param} of item {item}"),
            Target::Cab { id } => write!(f, "cab {id}"),
            Target::CabParam { cab, param } => write!(f, "parameter {param} of cab {cab}"),
            Target::PresetParam { id } => write!(f, "preset parameter {id}"),
        }
    }
}

/// Decode errors. Every variant maps to `Status::Warning`; the caller is
/// always safe to continue with the next message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("message too short: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("{target} not found")]
    EntityNotFound { target: Target },
    #[error("value rejected for {target}: {source}")]
    ValueRejected {
        target: Target,
        #[source]
        source: ValueError,
    },
    #[error("unknown message code {code:#010x}")]
    UnknownMessage { code: u32 },
}

impl ParseError {
    /// Status the observer layer should report for this error.
    pub fn status(&self) -> Status {
        Status::Warning
    }
}
