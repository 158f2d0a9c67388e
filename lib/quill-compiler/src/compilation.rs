use std::sync::Arc;

use quill_binder::Binder;
use quill_symbols::DataContext;
use quill_syntax_tree::SyntaxTree;

use crate::options::CompilationOptions;
use crate::semantic_model::SemanticModel;

/// A query paired with the catalog it is compiled against.
///
/// A compilation is immutable. The `with_*` methods return a new compilation
/// that shares everything it does not replace, and
/// [`semantic_model`](Compilation::semantic_model) binds from scratch on
/// every call.
#[derive(Debug, Clone)]
pub struct Compilation {
    syntax_tree: SyntaxTree,
    data_context: Arc<DataContext>,
    options: CompilationOptions,
}

impl Compilation {
    /// Create a new compilation builder.
    ///
    /// # Example
    /// ```
    /// # use quill_compiler::{Compilation, SyntaxTree};
    /// let compilation = Compilation::builder()
    ///     .syntax_tree(SyntaxTree::empty())
    ///     .build();
    /// assert!(compilation.semantic_model().diagnostics().is_empty());
    /// ```
    pub fn builder() -> crate::CompilationBuilder {
        crate::CompilationBuilder::new()
    }

    pub fn new(syntax_tree: SyntaxTree, data_context: Arc<DataContext>) -> Self {
        Self {
            syntax_tree,
            data_context,
            options: CompilationOptions::default(),
        }
    }

    /// An empty query over an empty catalog.
    pub fn empty() -> Self {
        Self::new(SyntaxTree::empty(), Arc::new(DataContext::empty()))
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }

    pub fn data_context(&self) -> &Arc<DataContext> {
        &self.data_context
    }

    pub fn options(&self) -> &CompilationOptions {
        &self.options
    }

    /// Returns this compilation with its query replaced.
    ///
    /// Passing the tree this compilation already holds yields a copy that
    /// shares it.
    pub fn with_syntax_tree(&self, syntax_tree: SyntaxTree) -> Self {
        if self.syntax_tree.ptr_eq(&syntax_tree) {
            return self.clone();
        }

        Self {
            syntax_tree,
            ..self.clone()
        }
    }

    /// Returns this compilation with its catalog replaced.
    pub fn with_data_context(&self, data_context: Arc<DataContext>) -> Self {
        if Arc::ptr_eq(&self.data_context, &data_context) {
            return self.clone();
        }

        Self {
            data_context,
            ..self.clone()
        }
    }

    pub fn with_options(&self, options: CompilationOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    /// Binds the query and returns a model for inspecting the result.
    pub fn semantic_model(&self) -> SemanticModel {
        let _span = tracing::debug_span!("semantic_model").entered();

        let binder = Binder::new(self.data_context.clone())
            .case_sensitive(self.options.case_sensitive)
            .max_diagnostics(self.options.max_diagnostics);
        let result = binder.bind(&self.syntax_tree.root());

        SemanticModel::new(self.clone(), result)
    }
}

impl Default for Compilation {
    fn default() -> Self {
        Self::empty()
    }
}
