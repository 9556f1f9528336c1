//! Unified error type.

/// The error type returned by patmux's fallible operations.
///
/// Only configuration mistakes are errors. A request that no route accepts
/// is not one: dispatch reports it as `None` (or [`Outcome::Unmatched`]) and
/// the caller decides what the client sees.
///
/// [`Outcome::Unmatched`]: crate::Outcome::Unmatched
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `:` marker with no name after it, e.g. `/users/:/posts`.
    #[error("invalid pattern {pattern:?}: parameter marker at byte {offset} has no name")]
    EmptyParamName { pattern: String, offset: usize },

    /// Two parameters with no literal between them, e.g. `/:a:b`.
    #[error("invalid pattern {pattern:?}: parameter `{name}` is directly followed by another parameter")]
    AdjacentParams { pattern: String, name: String },
}
