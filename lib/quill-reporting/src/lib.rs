//! Terminal rendering of diagnostics.
//!
//! Semantic errors are plain data in the crates that produce them. Anything
//! that implements [`IntoDiagnostic`] can be collected in a
//! [`DiagnosticContext`] and emitted against the query text it refers to.

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};
use std::collections::HashMap;

pub use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
pub use codespan_reporting::files::Error as FilesError;

/// Conversion of an error value into a codespan diagnostic.
pub trait IntoDiagnostic {
    fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize>;
}

impl<T: IntoDiagnostic + ?Sized> IntoDiagnostic for &T {
    fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        (**self).into_diagnostic(file_id)
    }
}

/// Collects diagnostics for one or more query texts and emits them.
pub struct DiagnosticContext {
    files: SimpleFiles<String, String>,
    diagnostics: Vec<Diagnostic<usize>>,
    file_map: HashMap<String, usize>,
}

impl DiagnosticContext {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            diagnostics: Vec::new(),
            file_map: HashMap::new(),
        }
    }

    /// Registers a query text under `name` and returns its file id.
    ///
    /// Registering the same name twice returns the first id.
    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&id) = self.file_map.get(&name) {
            return id;
        }
        let id = self.files.add(name.clone(), source.into());
        self.file_map.insert(name, id);
        id
    }

    pub fn throw<D: IntoDiagnostic>(&mut self, diagnostic: D, file_id: usize) {
        self.diagnostics.push(diagnostic.into_diagnostic(file_id));
    }

    /// Adds every diagnostic in `diagnostics` against the same file.
    pub fn extend<I>(&mut self, diagnostics: I, file_id: usize)
    where
        I: IntoIterator,
        I::Item: IntoDiagnostic,
    {
        self.diagnostics.extend(
            diagnostics
                .into_iter()
                .map(|diagnostic| diagnostic.into_diagnostic(file_id)),
        );
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error || d.severity == Severity::Bug)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Emits all diagnostics to stderr with color support.
    pub fn emit(&self) -> Result<(), FilesError> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let mut lock = writer.lock();
        self.emit_to(&mut lock)
    }

    pub fn emit_to<W: WriteColor>(&self, writer: &mut W) -> Result<(), FilesError> {
        let config = term::Config::default();

        for diagnostic in &self.diagnostics {
            term::emit(writer, &config, &self.files, diagnostic)?;
        }

        Ok(())
    }

    /// Renders all diagnostics without color codes.
    pub fn render(&self) -> Result<String, FilesError> {
        let mut writer = NoColor::new(Vec::new());
        self.emit_to(&mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    pub fn diagnostics(&self) -> &[Diagnostic<usize>] {
        &self.diagnostics
    }

    pub fn get_file_id(&self, name: &str) -> Option<usize> {
        self.file_map.get(name).copied()
    }
}

impl Default for DiagnosticContext {
    fn default() -> Self {
        Self::new()
    }
}
