//! Quill Syntax Tree
//!
//! This crate defines the syntax tree representation for the Quill query
//! language using the `rowan` library for a lossless, resilient syntax tree.
//!
//! # Overview
//!
//! The syntax tree uses `rowan`, which provides:
//! - **Lossless**: Preserves all source text including whitespace and comments
//! - **Immutable**: Green trees are immutable and can be shared across threads
//! - **Positional**: Every node and token knows its source range
//!
//! Producing trees from text is the job of an external parser. Consumers that
//! build trees directly use [`GreenNodeBuilder`] and wrap the result in a
//! [`SyntaxTree`].
//!
//! # Example
//!
//! ```
//! use quill_syntax_tree::{GreenNodeBuilder, SyntaxKind, SyntaxTree};
//!
//! let mut builder = GreenNodeBuilder::new();
//! builder.start_node(SyntaxKind::CompilationUnit.into());
//! builder.start_node(SyntaxKind::NameExpression.into());
//! builder.token(SyntaxKind::Identifier.into(), "Total");
//! builder.finish_node();
//! builder.finish_node();
//!
//! let tree = SyntaxTree::new(builder.finish());
//!
//! assert_eq!(tree.root().kind(), SyntaxKind::CompilationUnit);
//! assert_eq!(tree.text(), "Total");
//! ```

pub mod ast;
mod kind;

use std::sync::Arc;

use rowan::{GreenNode, Language};

pub use kind::SyntaxKind;
// Re-export for use by parsers and tree factories
pub use rowan::ast::AstNode;
pub use rowan::{GreenNodeBuilder, NodeOrToken, TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuillLanguage;

impl Language for QuillLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<QuillLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<QuillLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<QuillLanguage>;

/// An immutable syntax tree.
///
/// Only the green tree is stored, so a `SyntaxTree` is `Send + Sync` and can be
/// shared between threads. Each call to [`SyntaxTree::root`] creates a fresh
/// red tree over the same green nodes; nodes obtained from different calls
/// still compare equal when they denote the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    green: Arc<GreenNode>,
}

impl SyntaxTree {
    pub fn new(green: GreenNode) -> Self {
        Self {
            green: Arc::new(green),
        }
    }

    /// A tree consisting of an empty compilation unit.
    pub fn empty() -> Self {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(SyntaxKind::CompilationUnit.into());
        builder.finish_node();
        Self::new(builder.finish())
    }

    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root((*self.green).clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// The full source text the tree was built from.
    pub fn text(&self) -> String {
        self.root().text().to_string()
    }

    /// Returns true if both handles share the same green tree allocation.
    pub fn ptr_eq(&self, other: &SyntaxTree) -> bool {
        Arc::ptr_eq(&self.green, &other.green)
    }

    /// Returns true if `node` belongs to this tree.
    pub fn contains(&self, node: &SyntaxNode) -> bool {
        let root = node.ancestors().last().unwrap_or_else(|| node.clone());
        let green = root.green();
        std::ptr::eq(&*green, &**self.green)
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::empty()
    }
}
