//! Quill Symbols
//!
//! The catalog side of the semantic model: value types, the conversion
//! classifier, runtime values, and the symbols a host application registers
//! in a [`DataContext`] (tables, functions, aggregates, variables and member
//! providers for host types).
//!
//! Symbols that only exist inside one bound query, such as table instances,
//! live in `quill-binder`.

mod conversion;
mod data_context;
mod function;
mod id;
mod member;
mod provider;
mod table;
mod ty;
mod value;
mod variable;

pub use conversion::Conversion;
pub use data_context::{DataContext, DataContextBuilder};
pub use function::{AggregateSignature, AggregateSymbol, FunctionSymbol, ParameterSymbol};
pub use id::SymbolId;
pub use member::{MethodSymbol, PropertySymbol};
pub use provider::{
    FallbackProvider, MethodProvider, MethodProviderRegistry, NullProvider, PropertyProvider,
    PropertyProviderRegistry, ProviderRegistry, StaticMembers,
};
pub use table::{columns, ColumnSymbol, SchemaTableSymbol};
pub use ty::{HostType, Ty};
pub use value::Value;
pub use variable::{VariableError, VariableSymbol};
