#![warn(missing_docs)]
//! Colortext Core - Headless Code Editing Engine
//!
//! # Overview
//!
//! `colortext-core` is the editing engine of a code editor widget, without the widget. It owns
//! the document, the cursor and selection, the undo history, per-line breakpoints and error
//! markers, and an incremental syntax colorizer. Rendering, input handling and clipboard access
//! stay with the host, which drives the engine through commands and reads back coordinates and
//! glyph colors.
//!
//! # Core Features
//!
//! - **UTF-8 and tab aware coordinates**: positions are (line, visual column); tabs expand to
//!   the next tab stop and multi-byte characters occupy one column
//! - **Undo/Redo**: every user-level edit is one record of removed and added text plus the
//!   selection before and after
//! - **Incremental colorizing**: a comment/string/preprocessor scan followed by token
//!   classification of a bounded number of dirty lines per pass
//! - **Autocomplete and snippets**: ranked suggestions from language and program symbols, with
//!   linked tab stops such as `foo({$1:bar}, {$1})`
//! - **Debugger support**: breakpoints that follow line edits, a current-line indicator that
//!   makes the editor read-only, and hover text
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface (CommandExecutor)        │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  TextEditor: edits, movement, markers       │  ← Editing session
//! ├──────────────────────┬──────────────────────┤
//! │  Undo/Redo Log       │  Autocomplete        │
//! │                      │  & Snippets          │
//! ├──────────────────────┴──────────────────────┤
//! │  Colorizer (comment scan + tokenizer)       │  ← Glyph classes
//! ├─────────────────────────────────────────────┤
//! │  Document Buffer (lines of glyphs)          │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use colortext_core::{BuiltinLanguage, Coordinates, EditorConfig, PaletteIndex, TextEditor};
//!
//! let mut editor = TextEditor::new(EditorConfig::default());
//! editor.set_builtin_language(BuiltinLanguage::C).unwrap();
//! editor.set_text("int main() {\n\treturn 0;\n}");
//!
//! editor.set_cursor_position(Coordinates::new(1, 99));
//! assert_eq!(editor.cursor_position(), Coordinates::new(1, 13));
//!
//! editor.colorize_all();
//! let first = editor.document().lines()[0][0];
//! assert_eq!(first.class, PaletteIndex::Keyword);
//! ```
//!
//! # Module Description
//!
//! - [`coords`] - Coordinates, selection modes and UTF-8/tab helpers
//! - [`buffer`] - Lines of glyphs and column/byte conversions
//! - [`edit`] - Structural primitives and undoable edits
//! - [`undo`] - Undo records and the bounded history
//! - [`colorizer`] - Comment scan and token classification
//! - [`palette`] - Colors per palette index
//! - [`symbols`] - Program symbols fed by the host
//! - [`autocomplete`] - Suggestion lists
//! - [`snippet`] - Snippet tags and sessions
//! - [`search`] - Find and replace
//! - [`markers`] - Breakpoints and error markers
//! - [`host`] - Callbacks into the embedding application
//! - [`editor`] - The [`TextEditor`] facade
//! - [`commands`] - Unified command interface

pub mod autocomplete;
pub mod buffer;
pub mod colorizer;
pub mod commands;
pub mod config;
pub mod coords;
pub mod edit;
pub mod editor;
pub mod error;
pub mod host;
pub mod markers;
pub mod palette;
pub mod search;
pub mod snippet;
pub mod symbols;
pub mod undo;

pub use autocomplete::{Autocomplete, Suggestion, build_suggestions};
pub use buffer::{Document, Glyph, Line};
pub use colorizer::Colorizer;
pub use commands::{
    AutocompleteCommand, Command, CommandExecutor, CommandResult, CursorCommand, EditCommand,
};
pub use config::{EditorConfig, TabKeyBehavior};
pub use coords::{Coordinates, EditorState, SelectionMode};
pub use editor::TextEditor;
pub use error::{CommandError, LanguageError};
pub use host::{DebugAction, EditorHost, NullHost};
pub use markers::{Breakpoint, Breakpoints, ErrorMarkers};
pub use palette::Palette;
pub use snippet::{SnippetState, SnippetTag, parse_snippet};
pub use symbols::{AutocompleteEntry, FunctionSymbol, ProgramSymbols};
pub use undo::{UndoBuffer, UndoRecord};

pub use colortext_lang::{BuiltinLanguage, CommentConfig, LanguageDefinition, PaletteIndex};
