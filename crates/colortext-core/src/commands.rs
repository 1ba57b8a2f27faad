//! Command Interface Layer
//!
//! A unified command enum over [`TextEditor`] for frontends that prefer dispatching values to
//! calling methods. Mutating commands issued while the editor is read-only are rejected with
//! [`CommandError::ReadOnly`] instead of being silently ignored.
//!
//! # Example
//!
//! ```rust
//! use colortext_core::{Command, CommandExecutor, CursorCommand, EditCommand};
//!
//! let mut executor = CommandExecutor::default();
//! executor
//!     .execute(Command::Edit(EditCommand::InsertText {
//!         text: "Hello".to_string(),
//!     }))
//!     .unwrap();
//!
//! let commands = vec![
//!     Command::Cursor(CursorCommand::MoveHome { select: false }),
//!     Command::Edit(EditCommand::EnterCharacter { ch: '>', shift: false }),
//! ];
//! executor.execute_batch(commands).unwrap();
//! assert_eq!(executor.editor().text(), ">Hello");
//! ```

use crate::config::EditorConfig;
use crate::coords::{Coordinates, SelectionMode};
use crate::editor::TextEditor;
use crate::error::CommandError;

/// Text editing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Type a character at the cursor
    EnterCharacter {
        /// Character typed.
        ch: char,
        /// Shift held (unindents a block on tab).
        shift: bool,
    },
    /// Insert text at the cursor, replacing the selection
    InsertText {
        /// Text to insert.
        text: String,
    },
    /// Delete backward
    Backspace,
    /// Delete forward
    Delete,
    /// Tab key
    Indent,
    /// Shift-tab
    Unindent,
    /// Copy the selection (or the cursor line); allowed while read-only
    Copy,
    /// Cut the selection; copies while read-only
    Cut,
    /// Paste a clipboard payload
    Paste {
        /// Clipboard text.
        text: String,
    },
    /// Undo edits
    Undo {
        /// Number of edits.
        steps: usize,
    },
    /// Redo edits
    Redo {
        /// Number of edits.
        steps: usize,
    },
    /// Insert snippet text with `{$n:placeholder}` tags
    InsertSnippet {
        /// Snippet source.
        text: String,
    },
    /// Replace the next occurrence of `needle` (the selected one first)
    Replace {
        /// Text to search for.
        needle: String,
        /// Replacement text.
        replacement: String,
    },
    /// Replace every occurrence of `needle`
    ReplaceAll {
        /// Text to search for.
        needle: String,
        /// Replacement text.
        replacement: String,
    },
}

/// Cursor & selection commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorCommand {
    /// Move the cursor to a position (sanitized)
    MoveTo {
        /// Target line.
        line: usize,
        /// Target visual column.
        column: usize,
    },
    /// Move up
    MoveUp {
        /// Number of lines.
        amount: usize,
        /// Extend the selection.
        select: bool,
    },
    /// Move down
    MoveDown {
        /// Number of lines.
        amount: usize,
        /// Extend the selection.
        select: bool,
    },
    /// Move left
    MoveLeft {
        /// Number of characters (or words).
        amount: usize,
        /// Extend the selection.
        select: bool,
        /// Move by words.
        word: bool,
    },
    /// Move right
    MoveRight {
        /// Number of characters (or words).
        amount: usize,
        /// Extend the selection.
        select: bool,
        /// Move by words.
        word: bool,
    },
    /// Move to the document start
    MoveTop {
        /// Extend the selection.
        select: bool,
    },
    /// Move to the last line
    MoveBottom {
        /// Extend the selection.
        select: bool,
    },
    /// Move to the line start
    MoveHome {
        /// Extend the selection.
        select: bool,
    },
    /// Move to the line end
    MoveEnd {
        /// Extend the selection.
        select: bool,
    },
    /// Set selection range
    SetSelection {
        /// Selection start.
        start: Coordinates,
        /// Selection end.
        end: Coordinates,
        /// Snapping mode.
        mode: SelectionMode,
    },
    /// Select everything
    SelectAll,
    /// Select the word under the cursor
    SelectWordUnderCursor,
    /// Select the next occurrence of `needle` after the cursor, wrapping
    FindNext {
        /// Text to search for.
        needle: String,
    },
}

/// Suggestion list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteCommand {
    /// Build and show suggestions for the identifier at the cursor
    Open,
    /// Select the next suggestion
    Next,
    /// Select the previous suggestion
    Previous,
    /// Insert the selected suggestion
    Accept,
    /// Hide the list
    Close,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text editing commands
    Edit(EditCommand),
    /// Cursor command
    Cursor(CursorCommand),
    /// Autocomplete command
    Autocomplete(AutocompleteCommand),
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Success, no return value
    Success,
    /// Success, returns text
    Text(String),
    /// Success, returns position
    Position(Coordinates),
    /// Success, returns how many steps were applied
    Count(usize),
    /// Success, returns whether the suggestion list is open
    Open(bool),
    /// Find/replace result: the matched or inserted range
    Match {
        /// Range start.
        start: Coordinates,
        /// Range end.
        end: Coordinates,
    },
    /// Find/replace result: no occurrence
    NotFound,
}

impl CommandResult {
    fn from_match(found: Option<(Coordinates, Coordinates)>) -> Self {
        found.map_or(Self::NotFound, |(start, end)| Self::Match { start, end })
    }
}

/// Command executor
///
/// Owns a [`TextEditor`] and records every executed command.
///
/// # Example
///
/// ```rust
/// use colortext_core::{Command, CommandExecutor, CommandError, EditCommand};
///
/// let mut executor = CommandExecutor::default();
/// executor.editor_mut().set_read_only(true);
/// let result = executor.execute(Command::Edit(EditCommand::Backspace));
/// assert_eq!(result, Err(CommandError::ReadOnly));
/// ```
#[derive(Debug, Default)]
pub struct CommandExecutor {
    editor: TextEditor,
    command_history: Vec<Command>,
}

impl CommandExecutor {
    /// Create an executor over an empty editor.
    pub fn new(config: EditorConfig) -> Self {
        Self::from_editor(TextEditor::new(config))
    }

    /// Wrap an existing editor.
    pub fn from_editor(editor: TextEditor) -> Self {
        Self {
            editor,
            command_history: Vec::new(),
        }
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        self.command_history.push(command.clone());
        match command {
            Command::Edit(edit_cmd) => self.execute_edit(edit_cmd),
            Command::Cursor(cursor_cmd) => Ok(self.execute_cursor(cursor_cmd)),
            Command::Autocomplete(ac_cmd) => self.execute_autocomplete(ac_cmd),
        }
    }

    /// Execute commands in order, stopping at the first error
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        commands
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }

    /// Every command executed so far
    pub fn command_history(&self) -> &[Command] {
        &self.command_history
    }

    /// The editor
    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    /// The editor, mutably
    pub fn editor_mut(&mut self) -> &mut TextEditor {
        &mut self.editor
    }

    /// Unwrap the editor
    pub fn into_editor(self) -> TextEditor {
        self.editor
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    fn execute_edit(&mut self, command: EditCommand) -> Result<CommandResult, CommandError> {
        let read_only = self.editor.is_read_only();
        match command {
            EditCommand::Copy => return Ok(CommandResult::Text(self.editor.copy())),
            EditCommand::Cut => {
                return Ok(self
                    .editor
                    .cut()
                    .map_or(CommandResult::Success, CommandResult::Text));
            }
            _ if read_only => {
                tracing::debug!(?command, "rejected edit on read-only editor");
                return Err(CommandError::ReadOnly);
            }
            _ => {}
        }

        match command {
            EditCommand::EnterCharacter { ch, shift } => self.editor.enter_character(ch, shift),
            EditCommand::InsertText { text } => self.editor.insert_text(&text),
            EditCommand::Backspace => self.editor.backspace(),
            EditCommand::Delete => self.editor.delete(),
            EditCommand::Indent => self.editor.indent(),
            EditCommand::Unindent => self.editor.unindent(),
            EditCommand::Paste { text } => self.editor.paste(&text),
            EditCommand::Undo { steps } => {
                if !self.editor.can_undo() {
                    return Err(CommandError::NothingToUndo);
                }
                return Ok(CommandResult::Count(self.editor.undo(steps)));
            }
            EditCommand::Redo { steps } => {
                if !self.editor.can_redo() {
                    return Err(CommandError::NothingToRedo);
                }
                return Ok(CommandResult::Count(self.editor.redo(steps)));
            }
            EditCommand::InsertSnippet { text } => self.editor.insert_snippet(&text),
            EditCommand::Replace {
                needle,
                replacement,
            } => {
                let replaced = self.editor.replace(&needle, &replacement);
                return Ok(CommandResult::from_match(replaced));
            }
            EditCommand::ReplaceAll {
                needle,
                replacement,
            } => {
                let count = self.editor.replace_all(&needle, &replacement);
                return Ok(CommandResult::Count(count));
            }
            EditCommand::Copy | EditCommand::Cut => {}
        }
        Ok(CommandResult::Position(self.editor.cursor_position()))
    }

    fn execute_cursor(&mut self, command: CursorCommand) -> CommandResult {
        let editor = &mut self.editor;
        match command {
            CursorCommand::MoveTo { line, column } => {
                editor.set_cursor_position(Coordinates::new(line, column));
            }
            CursorCommand::MoveUp { amount, select } => editor.move_up(amount, select),
            CursorCommand::MoveDown { amount, select } => editor.move_down(amount, select),
            CursorCommand::MoveLeft {
                amount,
                select,
                word,
            } => editor.move_left(amount, select, word),
            CursorCommand::MoveRight {
                amount,
                select,
                word,
            } => editor.move_right(amount, select, word),
            CursorCommand::MoveTop { select } => editor.move_top(select),
            CursorCommand::MoveBottom { select } => editor.move_bottom(select),
            CursorCommand::MoveHome { select } => editor.move_home(select),
            CursorCommand::MoveEnd { select } => editor.move_end(select),
            CursorCommand::SetSelection { start, end, mode } => {
                editor.set_selection(start, end, mode);
                return CommandResult::Success;
            }
            CursorCommand::SelectAll => {
                editor.select_all();
                return CommandResult::Success;
            }
            CursorCommand::SelectWordUnderCursor => {
                editor.select_word_under_cursor();
                return CommandResult::Text(editor.selected_text());
            }
            CursorCommand::FindNext { needle } => {
                let from = editor.cursor_position();
                return CommandResult::from_match(editor.find_next(&needle, from));
            }
        }
        CommandResult::Position(editor.cursor_position())
    }

    fn execute_autocomplete(
        &mut self,
        command: AutocompleteCommand,
    ) -> Result<CommandResult, CommandError> {
        let editor = &mut self.editor;
        match command {
            AutocompleteCommand::Open => {
                return Ok(CommandResult::Open(editor.request_autocomplete()));
            }
            AutocompleteCommand::Next => editor.autocomplete_next(),
            AutocompleteCommand::Previous => editor.autocomplete_previous(),
            AutocompleteCommand::Close => editor.close_autocomplete(),
            AutocompleteCommand::Accept => {
                if editor.is_read_only() {
                    return Err(CommandError::ReadOnly);
                }
                if !editor.accept_suggestion() {
                    return Err(CommandError::NoSuggestion);
                }
                return Ok(CommandResult::Position(editor.cursor_position()));
            }
        }
        Ok(CommandResult::Open(editor.autocomplete().is_open()))
    }
}
