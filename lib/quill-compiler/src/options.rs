/// Settings that change how a compilation binds its query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilationOptions {
    /// If true, identifiers must match symbol names exactly
    pub case_sensitive: bool,
    /// Upper bound on recorded diagnostics; `None` keeps all of them
    pub max_diagnostics: Option<usize>,
}

impl CompilationOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare identifiers exactly instead of ignoring case
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Keep at most `limit` diagnostics. Binding still visits the whole tree.
    pub fn with_max_diagnostics(mut self, limit: usize) -> Self {
        self.max_diagnostics = Some(limit);
        self
    }
}
