// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for building parsing and queries

use thiserror::Error;

/// Result type alias for building operations
pub type Result<T> = std::result::Result<T, BuildingError>;

/// Errors that can occur while building or querying a component tree
#[derive(Error, Debug)]
pub enum BuildingError {
    /// The input document is structurally invalid or misses a required field
    #[error("Malformed input at {path}: {message}")]
    MalformedInput { path: String, message: String },

    /// No component carries the requested name
    #[error("Component with name '{0}' not found")]
    NotFound(String),

    /// A ratio query hit a zero denominator
    #[error("Cannot compute {quantity} for component '{component}': denominator is zero")]
    DivisionAmbiguity {
        quantity: &'static str,
        component: String,
    },

    /// Structural mutation requested on a leaf component
    #[error("Operation {operation} is not supported on {component}")]
    UnsupportedOperation {
        operation: &'static str,
        component: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildingError {
    /// Create a new malformed input error
    pub fn malformed(path: impl Into<String>, msg: impl Into<String>) -> Self {
        BuildingError::MalformedInput {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        BuildingError::NotFound(name.into())
    }

    /// Whether this error only aborts the scoped query that raised it
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BuildingError::NotFound(_) | BuildingError::DivisionAmbiguity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_path() {
        let err = BuildingError::malformed("$.levels[0].rooms[1].cube", "expected a number");
        assert_eq!(
            err.to_string(),
            "Malformed input at $.levels[0].rooms[1].cube: expected a number"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_not_found_is_recoverable() {
        let err = BuildingError::not_found("Attic");
        assert_eq!(err.to_string(), "Component with name 'Attic' not found");
        assert!(err.is_recoverable());
    }
}
