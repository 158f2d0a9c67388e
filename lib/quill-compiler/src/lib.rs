//! # Quill Compiler
//!
//! This crate provides the high-level compilation API for the Quill query
//! language: a [`Compilation`] pairs a syntax tree with a catalog, and its
//! [`SemanticModel`] answers questions about the bound query.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use quill_compiler::{Compilation, DataContext, DiagnosticContext, SchemaTableSymbol, SyntaxTree, Ty};
//!
//! let data_context = DataContext::builder()
//!     .table(SchemaTableSymbol::new("Orders", [("Id", Ty::Int32), ("Total", Ty::Decimal)]))
//!     .with_default_aggregates()
//!     .build();
//!
//! let compilation = Compilation::builder()
//!     .syntax_tree(SyntaxTree::empty())
//!     .data_context(Arc::new(data_context))
//!     .build();
//!
//! // Bind and report problems
//! let model = compilation.semantic_model();
//! let mut diagnostics = DiagnosticContext::new();
//! model.emit_diagnostics(&mut diagnostics, "query.sql");
//! assert!(!diagnostics.has_errors());
//!
//! // Completion at the start of the query sees the catalog
//! assert_eq!(model.lookup_symbols(0)[0].name(), "Orders");
//! ```

mod builder;
mod compilation;
mod options;
mod semantic_model;

#[cfg(test)]
mod test_trees;

pub use builder::CompilationBuilder;
pub use compilation::Compilation;
pub use options::CompilationOptions;
pub use semantic_model::SemanticModel;

// Re-export commonly used types from dependencies
pub use quill_binder::{BindingResult, BoundNode, BoundNodeKind, Diagnostic, DiagnosticId, Symbol, SymbolKind};
pub use quill_reporting::{DiagnosticContext, IntoDiagnostic};
pub use quill_symbols::{Conversion, DataContext, SchemaTableSymbol, Ty};
pub use quill_syntax_tree::{SyntaxNode, SyntaxTree};
