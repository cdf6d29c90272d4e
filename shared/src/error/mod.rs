//! Unified error codes for the seating planner
//!
//! - [`ErrorCode`]: standardized numeric codes shared with the UI layer
//! - [`ErrorCategory`]: classification of codes by range
//!
//! Rich, typed errors live next to the code that raises them (the engine's
//! `PlanError`, the persistence boundary's `PersistenceError`); both map onto
//! an [`ErrorCode`] before crossing into [`crate::plan::CommandError`].
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCategory, ErrorCode};
//!
//! let code = ErrorCode::CapacityExceeded;
//! assert_eq!(code.code(), 2002);
//! assert_eq!(code.category(), ErrorCategory::Assignment);
//! ```

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
