// File: src/error.rs
// Purpose: Error types for route resolution and parameter binding

use thiserror::Error;

/// Errors produced by the route table and navigation manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The view-model type was never registered with the route table.
    #[error("`{type_name}` has no associated route")]
    RouteNotFound {
        /// Full name of the view-model type that was looked up
        type_name: &'static str,
    },

    /// The navigation key was never registered with the route table.
    #[error("no route is associated with key `{key}`")]
    KeyNotFound {
        /// The key that was looked up
        key: String,
    },

    /// A registration carried an empty or malformed argument.
    #[error("invalid {what}: {reason}")]
    InvalidArgument {
        /// Which argument was rejected ("route template", "navigation key", ...)
        what: &'static str,
        reason: String,
    },
}

/// Errors produced while building or applying a parameter binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// Two declared parameters on one type resolve to the same external
    /// name (compared case-insensitively). Surfaced on the first
    /// resolution of the type and memoized; every later resolution of
    /// the same type fails with the same error.
    #[error("duplicate parameter name `{name}` declared on `{type_name}`")]
    DuplicateName {
        type_name: &'static str,
        name: String,
    },

    /// A supplied value could not be assigned to the matching parameter.
    #[error("cannot assign parameter `{name}` on `{type_name}`: {reason}")]
    Assignment {
        type_name: &'static str,
        name: String,
        reason: String,
    },
}
