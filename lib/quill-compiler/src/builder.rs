use std::sync::Arc;

use quill_symbols::DataContext;
use quill_syntax_tree::SyntaxTree;

use crate::compilation::Compilation;
use crate::options::CompilationOptions;

/// Builder for creating a `Compilation`.
///
/// Anything not set falls back to an empty query, an empty catalog and
/// default options.
#[derive(Debug, Default)]
pub struct CompilationBuilder {
    syntax_tree: Option<SyntaxTree>,
    data_context: Option<Arc<DataContext>>,
    options: CompilationOptions,
}

impl CompilationBuilder {
    /// Create a new compilation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query to compile.
    ///
    /// # Arguments
    /// * `syntax_tree` - A tree produced by the parser
    pub fn syntax_tree(mut self, syntax_tree: SyntaxTree) -> Self {
        self.syntax_tree = Some(syntax_tree);
        self
    }

    /// Set the catalog names are resolved against.
    ///
    /// # Example
    /// ```
    /// # use std::sync::Arc;
    /// # use quill_compiler::{CompilationBuilder, DataContext, SchemaTableSymbol, Ty};
    /// let data_context = DataContext::builder()
    ///     .table(SchemaTableSymbol::new("Orders", [("Id", Ty::Int32)]))
    ///     .build();
    ///
    /// let compilation = CompilationBuilder::new()
    ///     .data_context(Arc::new(data_context))
    ///     .build();
    /// assert_eq!(compilation.data_context().tables().len(), 1);
    /// ```
    pub fn data_context(mut self, data_context: Arc<DataContext>) -> Self {
        self.data_context = Some(data_context);
        self
    }

    pub fn options(mut self, options: CompilationOptions) -> Self {
        self.options = options;
        self
    }

    /// Compare identifiers exactly instead of ignoring case.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.options.case_sensitive = case_sensitive;
        self
    }

    /// Keep at most `limit` diagnostics.
    pub fn max_diagnostics(mut self, limit: usize) -> Self {
        self.options.max_diagnostics = Some(limit);
        self
    }

    /// Build the compilation.
    ///
    /// Nothing is bound yet; binding happens in
    /// [`Compilation::semantic_model`].
    ///
    /// # Example
    /// ```
    /// # use quill_compiler::{CompilationBuilder, SyntaxTree};
    /// let compilation = CompilationBuilder::new()
    ///     .syntax_tree(SyntaxTree::empty())
    ///     .case_sensitive(true)
    ///     .build();
    ///
    /// assert!(compilation.options().case_sensitive);
    /// ```
    pub fn build(self) -> Compilation {
        let syntax_tree = self.syntax_tree.unwrap_or_default();
        let data_context = self
            .data_context
            .unwrap_or_else(|| Arc::new(DataContext::empty()));

        Compilation::new(syntax_tree, data_context).with_options(self.options)
    }
}
