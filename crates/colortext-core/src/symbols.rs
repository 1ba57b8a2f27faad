//! Program symbols pushed by the host: functions with their scopes, user types, uniforms,
//! globals, and flat autocomplete entries.
//!
//! The colorizer uses these tables to escalate plain identifiers; autocomplete searches them
//! for suggestions.

use colortext_lang::PaletteIndex;

/// A function declared in the edited program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionSymbol {
    /// Function name.
    pub name: String,
    /// First line of the declaration (zero-based).
    pub line_start: usize,
    /// Last line of the body (zero-based).
    pub line_end: usize,
    /// Parameter names.
    pub arguments: Vec<String>,
    /// Local variable names.
    pub locals: Vec<String>,
}

impl FunctionSymbol {
    /// Create a function symbol spanning `line_start..=line_end`.
    pub fn new(name: impl Into<String>, line_start: usize, line_end: usize) -> Self {
        Self {
            name: name.into(),
            line_start,
            line_end,
            arguments: Vec::new(),
            locals: Vec::new(),
        }
    }

    /// Set the parameter names.
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Set the local variable names.
    pub fn with_locals<I, S>(mut self, locals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locals = locals.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if `line` lies within `before` lines above the declaration and one line
    /// past its end.
    pub(crate) fn in_scope(&self, line: usize, before: usize) -> bool {
        line + before >= self.line_start && line <= self.line_end + 1
    }
}

/// A flat suggestion supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteEntry {
    /// Text matched against the typed word.
    pub search: String,
    /// Text shown in the list.
    pub display: String,
    /// Text inserted on acceptance. May contain snippet tags.
    pub value: String,
}

/// Every symbol table the host can feed.
#[derive(Debug, Clone, Default)]
pub struct ProgramSymbols {
    /// Functions, in insertion order.
    pub functions: Vec<FunctionSymbol>,
    /// User-declared type names.
    pub user_types: Vec<String>,
    /// Uniform variable names.
    pub uniforms: Vec<String>,
    /// Global variable names.
    pub globals: Vec<String>,
    /// Flat suggestion entries.
    pub entries: Vec<AutocompleteEntry>,
}

impl ProgramSymbols {
    /// Add a function, replacing one with the same name.
    pub fn add_function(&mut self, function: FunctionSymbol) {
        match self.functions.iter_mut().find(|f| f.name == function.name) {
            Some(existing) => *existing = function,
            None => self.functions.push(function),
        }
    }

    /// Drop functions, user types, uniforms and globals. Entries are kept.
    pub fn clear_program(&mut self) {
        self.functions.clear();
        self.user_types.clear();
        self.uniforms.clear();
        self.globals.clear();
    }

    /// Classify an identifier seen on `line`.
    ///
    /// Function names win, then parameters and locals of a function whose scope covers the
    /// line, then uniforms, globals and user types.
    pub fn classify(&self, identifier: &str, line: usize) -> Option<PaletteIndex> {
        for function in &self.functions {
            if function.name == identifier {
                return Some(PaletteIndex::UserFunction);
            }
            if function.in_scope(line, 3) {
                if function.arguments.iter().any(|a| a == identifier) {
                    return Some(PaletteIndex::FunctionArgument);
                }
                if function.locals.iter().any(|l| l == identifier) {
                    return Some(PaletteIndex::LocalVariable);
                }
            }
        }

        let tables = [
            (&self.uniforms, PaletteIndex::UniformVariable),
            (&self.globals, PaletteIndex::GlobalVariable),
            (&self.user_types, PaletteIndex::UserType),
        ];
        tables
            .into_iter()
            .find(|(names, _)| names.iter().any(|n| n == identifier))
            .map(|(_, class)| class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> ProgramSymbols {
        let mut symbols = ProgramSymbols::default();
        symbols.add_function(
            FunctionSymbol::new("main", 10, 20)
                .with_arguments(["argc"])
                .with_locals(["count"]),
        );
        symbols.uniforms.push("uTime".into());
        symbols.globals.push("gScale".into());
        symbols.user_types.push("Light".into());
        symbols
    }

    #[test]
    fn test_classify_function_and_tables() {
        let symbols = symbols();
        assert_eq!(symbols.classify("main", 0), Some(PaletteIndex::UserFunction));
        assert_eq!(symbols.classify("uTime", 0), Some(PaletteIndex::UniformVariable));
        assert_eq!(symbols.classify("gScale", 0), Some(PaletteIndex::GlobalVariable));
        assert_eq!(symbols.classify("Light", 0), Some(PaletteIndex::UserType));
        assert_eq!(symbols.classify("other", 0), None);
    }

    #[test]
    fn test_scoped_names() {
        let symbols = symbols();
        assert_eq!(symbols.classify("argc", 15), Some(PaletteIndex::FunctionArgument));
        assert_eq!(symbols.classify("count", 7), Some(PaletteIndex::LocalVariable));
        assert_eq!(symbols.classify("count", 21), Some(PaletteIndex::LocalVariable));
        assert_eq!(symbols.classify("count", 6), None);
        assert_eq!(symbols.classify("argc", 22), None);
    }

    #[test]
    fn test_add_function_replaces_same_name() {
        let mut symbols = symbols();
        symbols.add_function(FunctionSymbol::new("main", 1, 2));
        assert_eq!(symbols.functions.len(), 1);
        assert_eq!(symbols.functions[0].line_start, 1);
    }
}
