//! Unified error handling for the routesnap library.
//!
//! Construction is the only fallible surface: queries are total and never
//! return errors. All variants here are argument errors, recoverable only
//! by supplying valid input.

use std::fmt;

/// Unified error type for routesnap operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSnapError {
    /// The route contains no segments at all
    EmptyRoute,
    /// The route contains segments, but none of them has any points
    NoCoordinates { segment_count: usize },
    /// An index configuration value is out of range
    InvalidConfig { message: String },
}

impl fmt::Display for RouteSnapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSnapError::EmptyRoute => {
                write!(f, "Route contains no segments")
            }
            RouteSnapError::NoCoordinates { segment_count } => {
                write!(
                    f,
                    "Route has {} segments but no coordinates",
                    segment_count
                )
            }
            RouteSnapError::InvalidConfig { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for RouteSnapError {}

/// Result type alias for routesnap operations.
pub type Result<T> = std::result::Result<T, RouteSnapError>;
