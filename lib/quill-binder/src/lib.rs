//! Binder for the Quill query language
//!
//! This crate turns a syntax tree into a bound tree: every name is resolved to
//! a symbol, every expression gets a type, and semantic errors are collected
//! as diagnostics instead of aborting.
//!
//! # Architecture
//!
//! - `symbols`: Query-scoped symbols (table instances, derived tables, CTEs)
//!   and the [`Symbol`] union over every kind of symbol
//! - `bound`: The bound tree
//! - `context`: The scope chain used for name lookup
//! - `binder`: The bind pass itself
//! - `members`: Memoized method and property lookups
//! - `diagnostics`: Semantic error types
//! - `result`: The [`BindingResult`] produced by a bind pass
//!
//! # Usage
//!
//! ```ignore
//! use quill_binder::Binder;
//!
//! let result = Binder::new(data_context).bind(&tree.root());
//! for diagnostic in result.diagnostics() {
//!     println!("{diagnostic}");
//! }
//! ```

mod binder;
pub mod bound;
mod context;
pub mod diagnostics;
mod members;
mod result;
pub mod symbols;
pub mod utils;

pub use binder::Binder;
pub use bound::{BoundExpression, BoundNode, BoundNodeKind, BoundQuery, BoundTableReference};
pub use context::{BindingContext, Resolution, Scope};
pub use diagnostics::{Diagnostic, DiagnosticId};
pub use members::MemberCache;
pub use result::BindingResult;
pub use symbols::{
    BadSymbol, BadTableSymbol, CommonTableExpressionSymbol, DerivedTableSymbol,
    QueryColumnInstanceSymbol, Symbol, SymbolKind, TableColumnInstanceSymbol,
    TableInstanceSymbol, TableRef, ValueSlot,
};
