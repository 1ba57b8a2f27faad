#![warn(missing_docs)]
//! `colortext-lang` - data-driven language definitions for `colortext-core`.
//!
//! This crate intentionally stays dependency-free. It describes what a language looks like
//! (keywords, known identifiers, comment delimiters, token rules or a hand-written tokenizer)
//! and leaves compiling and matching to the engine.
//!
//! # Example
//!
//! ```rust
//! use colortext_lang::{LanguageDefinition, PaletteIndex};
//!
//! let lang = LanguageDefinition::new("Toy")
//!     .with_keywords(["if", "else"])
//!     .with_rule("[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier);
//!
//! assert!(lang.is_keyword("if"));
//! assert!(!lang.is_keyword("ifx"));
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

mod builtin;
pub mod tokenize;

pub use builtin::BuiltinLanguage;

/// Semantic classification of a glyph.
///
/// The first group classifies text; the rest name the UI elements a palette provides colors for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum PaletteIndex {
    /// Unclassified text.
    #[default]
    Default,
    /// Language keyword.
    Keyword,
    /// Numeric literal.
    Number,
    /// String literal.
    String,
    /// Character literal.
    CharLiteral,
    /// Operators and delimiters.
    Punctuation,
    /// Preprocessor directive.
    Preprocessor,
    /// Identifier not found in any table.
    Identifier,
    /// Identifier documented by the language definition.
    KnownIdentifier,
    /// Identifier known to the preprocessor.
    PreprocIdentifier,
    /// Single-line comment.
    Comment,
    /// Multi-line comment.
    MultiLineComment,
    /// Editor background.
    Background,
    /// Cursor.
    Cursor,
    /// Selection background.
    Selection,
    /// Error marker line background.
    ErrorMarker,
    /// Breakpoint fill.
    Breakpoint,
    /// Breakpoint outline.
    BreakpointOutline,
    /// Debugger current line indicator.
    CurrentLineIndicator,
    /// Debugger current line indicator outline.
    CurrentLineIndicatorOutline,
    /// Line number gutter.
    LineNumber,
    /// Current line fill (focused).
    CurrentLineFill,
    /// Current line fill (unfocused).
    CurrentLineFillInactive,
    /// Current line edge.
    CurrentLineEdge,
    /// Error message text.
    ErrorMessage,
    /// Disabled breakpoint fill.
    BreakpointDisabled,
    /// Function declared by the host program.
    UserFunction,
    /// Type declared by the host program.
    UserType,
    /// Uniform variable.
    UniformVariable,
    /// Global variable.
    GlobalVariable,
    /// Local variable of the enclosing function.
    LocalVariable,
    /// Argument of the enclosing function.
    FunctionArgument,
}

impl PaletteIndex {
    /// Number of palette entries.
    pub const COUNT: usize = PaletteIndex::FunctionArgument as usize + 1;

    /// Position of this entry inside a palette.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Comment tokens/config for a given language.
///
/// The colorizer uses this to track single-line and delimited comments across the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `--`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// Line comment token as bytes, if configured and non-empty.
    pub fn line_token(&self) -> Option<&[u8]> {
        self.line
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::as_bytes)
    }

    /// Block comment delimiters as bytes, if both are configured and non-empty.
    pub fn block_tokens(&self) -> Option<(&[u8], &[u8])> {
        let start = self.block_start.as_deref().filter(|s| !s.is_empty())?;
        let end = self.block_end.as_deref().filter(|s| !s.is_empty())?;
        Some((start.as_bytes(), end.as_bytes()))
    }
}

/// Documentation attached to a known identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identifier {
    /// Short description shown in hover tooltips.
    pub declaration: String,
}

impl Identifier {
    /// Create an identifier entry with the given description.
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
        }
    }
}

/// A token found by a tokenizer, in byte offsets relative to the tokenizer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    /// Classification of the token.
    pub class: PaletteIndex,
}

/// Hand-written tokenizer: finds the next token at the beginning of `input`.
///
/// Returning `None` means nothing matched; the caller then advances one byte.
pub type TokenizeFn = fn(input: &[u8]) -> Option<Token>;

/// A regular expression rule. Rules are tried in order, first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    /// Pattern source (regex syntax). It is anchored at the scan position by the engine.
    pub pattern: String,
    /// Classification applied to a match.
    pub class: PaletteIndex,
}

/// Immutable description of a language.
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Display name.
    pub name: String,
    /// Keyword set (stored upper-case for case-insensitive languages).
    pub keywords: BTreeSet<String>,
    /// Known identifiers with their descriptions.
    pub identifiers: BTreeMap<String, Identifier>,
    /// Identifiers understood by the preprocessor.
    pub preproc_identifiers: BTreeMap<String, Identifier>,
    /// Comment delimiters.
    pub comments: CommentConfig,
    /// Byte that introduces a preprocessor directive.
    pub preproc_char: u8,
    /// Whether new lines inherit indentation.
    pub auto_indentation: bool,
    /// Hand-written tokenizer, tried before the rule table.
    pub tokenize: Option<TokenizeFn>,
    /// Ordered regex rules.
    pub token_rules: Vec<TokenRule>,
    /// Whether identifiers are compared case-sensitively.
    pub case_sensitive: bool,
}

impl Default for LanguageDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            keywords: BTreeSet::new(),
            identifiers: BTreeMap::new(),
            preproc_identifiers: BTreeMap::new(),
            comments: CommentConfig::default(),
            preproc_char: b'#',
            auto_indentation: true,
            tokenize: None,
            token_rules: Vec::new(),
            case_sensitive: true,
        }
    }
}

impl LanguageDefinition {
    /// Create an empty definition with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Add documented identifiers.
    pub fn with_identifiers<I, S, D>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        self.identifiers.extend(
            identifiers
                .into_iter()
                .map(|(name, doc)| (name.into(), Identifier::new(doc))),
        );
        self
    }

    /// Add identifiers that share the generic "Built-in function" description.
    pub fn with_builtin_functions<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_identifiers(names.into_iter().map(|n| (n, "Built-in function")))
    }

    /// Add preprocessor identifiers.
    pub fn with_preproc_identifiers<I, S, D>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        self.preproc_identifiers.extend(
            identifiers
                .into_iter()
                .map(|(name, doc)| (name.into(), Identifier::new(doc))),
        );
        self
    }

    /// Set the comment delimiters.
    pub fn with_comments(mut self, comments: CommentConfig) -> Self {
        self.comments = comments;
        self
    }

    /// Use a hand-written tokenizer.
    pub fn with_tokenizer(mut self, tokenize: TokenizeFn) -> Self {
        self.tokenize = Some(tokenize);
        self
    }

    /// Append a regex rule.
    pub fn with_rule(mut self, pattern: impl Into<String>, class: PaletteIndex) -> Self {
        self.token_rules.push(TokenRule {
            pattern: pattern.into(),
            class,
        });
        self
    }

    /// Compare identifiers case-insensitively.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Disable indentation inheritance for new lines.
    pub fn without_auto_indentation(mut self) -> Self {
        self.auto_indentation = false;
        self
    }

    /// Normalize an identifier for table lookups.
    pub fn normalize<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(identifier)
        } else {
            Cow::Owned(identifier.to_uppercase())
        }
    }

    /// Returns `true` if `identifier` is a keyword.
    pub fn is_keyword(&self, identifier: &str) -> bool {
        self.keywords.contains(self.normalize(identifier).as_ref())
    }

    /// Look up a known identifier.
    pub fn known_identifier(&self, identifier: &str) -> Option<&Identifier> {
        self.identifiers.get(self.normalize(identifier).as_ref())
    }

    /// Look up a preprocessor identifier.
    pub fn preproc_identifier(&self, identifier: &str) -> Option<&Identifier> {
        self.preproc_identifiers
            .get(self.normalize(identifier).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_count_covers_every_entry() {
        assert_eq!(PaletteIndex::COUNT, 32);
        assert_eq!(PaletteIndex::Default.index(), 0);
        assert_eq!(PaletteIndex::FunctionArgument.index(), 31);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let lang = LanguageDefinition::new("Q")
            .with_keywords(["SELECT"])
            .case_insensitive();
        assert!(lang.is_keyword("select"));
        assert!(lang.is_keyword("SeLeCt"));
        assert!(!lang.is_keyword("selects"));
    }

    #[test]
    fn test_comment_tokens() {
        let c = CommentConfig::line_and_block("//", "/*", "*/");
        assert_eq!(c.line_token(), Some(&b"//"[..]));
        assert_eq!(c.block_tokens(), Some((&b"/*"[..], &b"*/"[..])));

        let lua = CommentConfig::line("--");
        assert!(lua.block_tokens().is_none());

        let empty = CommentConfig {
            line: Some(String::new()),
            ..CommentConfig::default()
        };
        assert!(empty.line_token().is_none());
    }

    #[test]
    fn test_builtin_function_description() {
        let lang = LanguageDefinition::new("x").with_builtin_functions(["sqrt"]);
        assert_eq!(
            lang.known_identifier("sqrt").map(|i| i.declaration.as_str()),
            Some("Built-in function")
        );
    }
}
