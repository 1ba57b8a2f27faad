//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while preparing a language definition for the colorizer.
pub enum LanguageError {
    #[error("regex compile error for pattern '{pattern}': {source}")]
    /// A token rule failed to compile.
    InvalidPattern {
        /// The rule's pattern source.
        pattern: String,
        /// The compiler error.
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors returned by [`crate::CommandExecutor::execute`].
pub enum CommandError {
    #[error("editor is read-only")]
    /// A mutating command was issued while the editor is read-only or debugging.
    ReadOnly,

    #[error("nothing to undo")]
    /// Undo requested with an empty history.
    NothingToUndo,

    #[error("nothing to redo")]
    /// Redo requested with no undone records.
    NothingToRedo,

    #[error("no autocomplete suggestion is selected")]
    /// Accept requested while the suggestion list is closed or empty.
    NoSuggestion,
}
