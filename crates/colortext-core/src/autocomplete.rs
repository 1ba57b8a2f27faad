//! Suggestion lists.
//!
//! [`build_suggestions`] searches every symbol source for the typed word; [`Autocomplete`]
//! holds the open list and its selection.

use crate::coords::Coordinates;
use crate::symbols::ProgramSymbols;
use colortext_lang::LanguageDefinition;

/// One entry of the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text shown in the list.
    pub display: String,
    /// Text inserted on acceptance.
    pub value: String,
}

impl Suggestion {
    fn new(display: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            value: value.into(),
        }
    }
}

/// Returns `true` if `word` can be completed (it contains an ASCII letter).
pub fn is_completable(word: &str) -> bool {
    word.bytes().any(|b| b.is_ascii_alphabetic())
}

/// Search every source for `word`, case-insensitively.
///
/// Candidates are gathered from the flat entries, functions (their locals and arguments only
/// when `cursor_line` is in scope), uniforms, globals, user types, keywords and known
/// identifiers, in that order. Matches at position 0 come first; the rest keep their
/// encounter order.
pub fn build_suggestions(
    word: &str,
    cursor_line: usize,
    symbols: &ProgramSymbols,
    language: &LanguageDefinition,
    complete_braces: bool,
) -> Vec<Suggestion> {
    if !is_completable(word) {
        return Vec::new();
    }
    let needle = word.to_lowercase();
    let call = |name: &str| {
        if complete_braces {
            format!("{name}()")
        } else {
            name.to_string()
        }
    };

    let mut found: Vec<(usize, Suggestion)> = Vec::new();
    let mut consider = |search: &str, suggestion: Suggestion| {
        if let Some(location) = search.to_lowercase().find(&needle) {
            found.push((location, suggestion));
        }
    };

    for entry in &symbols.entries {
        consider(
            &entry.search,
            Suggestion::new(&entry.display, &entry.value),
        );
    }
    for function in &symbols.functions {
        if function.in_scope(cursor_line, 2) {
            for name in function.locals.iter().chain(&function.arguments) {
                consider(name, Suggestion::new(name, name));
            }
        }
        consider(
            &function.name,
            Suggestion::new(&function.name, call(&function.name)),
        );
    }
    for name in symbols
        .uniforms
        .iter()
        .chain(&symbols.globals)
        .chain(&symbols.user_types)
        .chain(&language.keywords)
    {
        consider(name, Suggestion::new(name, name));
    }
    for name in language.identifiers.keys() {
        consider(name, Suggestion::new(name, call(name)));
    }

    let (prefix, rest): (Vec<_>, Vec<_>) = found.into_iter().partition(|(loc, _)| *loc == 0);
    prefix
        .into_iter()
        .chain(rest)
        .map(|(_, suggestion)| suggestion)
        .collect()
}

/// The suggestion list and its selection.
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    suggestions: Vec<Suggestion>,
    selected: usize,
    open: bool,
    word: String,
    anchor: Coordinates,
}

impl Autocomplete {
    /// Returns `true` if the list is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current suggestions.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Index of the selected suggestion.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected suggestion while the list is open.
    pub fn selected(&self) -> Option<&Suggestion> {
        if self.open {
            self.suggestions.get(self.selected)
        } else {
            None
        }
    }

    /// The word the list was built for.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Start of that word in the document.
    pub fn anchor(&self) -> Coordinates {
        self.anchor
    }

    /// Move the selection down, wrapping.
    pub fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = (self.selected + 1) % self.suggestions.len();
        }
    }

    /// Move the selection up, wrapping.
    pub fn select_previous(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }

    /// Replace the list. It opens only when `suggestions` is non-empty.
    pub(crate) fn show(&mut self, word: String, anchor: Coordinates, suggestions: Vec<Suggestion>) {
        self.open = !suggestions.is_empty();
        self.suggestions = suggestions;
        self.selected = 0;
        self.word = word;
        self.anchor = anchor;
    }

    /// Hide the list.
    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{AutocompleteEntry, FunctionSymbol};
    use pretty_assertions::assert_eq;

    fn displays(list: &[Suggestion]) -> Vec<&str> {
        list.iter().map(|s| s.display.as_str()).collect()
    }

    fn fixture() -> (ProgramSymbols, LanguageDefinition) {
        let mut symbols = ProgramSymbols::default();
        symbols.entries.push(AutocompleteEntry {
            search: "Helper".into(),
            display: "helper snippet".into(),
            value: "helper({$1})".into(),
        });
        symbols.add_function(
            FunctionSymbol::new("shade", 10, 20)
                .with_arguments(["help_arg"])
                .with_locals(["local_help"]),
        );
        symbols.globals.push("gHelp".into());
        let lang = LanguageDefinition::new("Toy")
            .with_keywords(["help"])
            .with_identifiers([("helpful", "doc")]);
        (symbols, lang)
    }

    #[test]
    fn test_prefix_matches_come_first() {
        let (symbols, lang) = fixture();
        let list = build_suggestions("HELP", 0, &symbols, &lang, false);
        assert_eq!(
            displays(&list),
            vec!["helper snippet", "help", "helpful", "gHelp"]
        );
    }

    #[test]
    fn test_scoped_names_and_braces() {
        let (symbols, lang) = fixture();
        let list = build_suggestions("help", 9, &symbols, &lang, true);
        assert_eq!(
            displays(&list),
            vec![
                "helper snippet",
                "help_arg",
                "help",
                "helpful",
                "local_help",
                "gHelp"
            ]
        );
        assert_eq!(list[3].value, "helpful()");

        let list = build_suggestions("sha", 0, &symbols, &lang, true);
        assert_eq!(list, vec![Suggestion::new("shade", "shade()")]);
    }

    #[test]
    fn test_word_without_letters_is_rejected() {
        let (symbols, lang) = fixture();
        assert!(build_suggestions("_1", 0, &symbols, &lang, false).is_empty());
    }

    #[test]
    fn test_selection_wraps() {
        let mut ac = Autocomplete::default();
        ac.show("x".into(), Coordinates::default(), Vec::new());
        assert!(!ac.is_open());

        ac.show(
            "x".into(),
            Coordinates::default(),
            vec![Suggestion::new("a", "a"), Suggestion::new("b", "b")],
        );
        assert!(ac.is_open());
        ac.select_previous();
        assert_eq!(ac.selected().map(|s| s.value.as_str()), Some("b"));
        ac.select_next();
        assert_eq!(ac.selected_index(), 0);
        ac.close();
        assert!(ac.selected().is_none());
    }
}
