//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Layout errors
/// - 2xxx: Assignment errors
/// - 3xxx: Collaboration errors
/// - 4xxx: History errors
/// - everything else: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Layout errors (1xxx)
    Layout,
    /// Assignment errors (2xxx)
    Assignment,
    /// Collaboration errors (3xxx)
    Collaboration,
    /// History errors (4xxx)
    History,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Layout,
            2000..3000 => Self::Assignment,
            3000..4000 => Self::Collaboration,
            4000..5000 => Self::History,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Layout => "layout",
            Self::Assignment => "assignment",
            Self::Collaboration => "collaboration",
            Self::History => "history",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
