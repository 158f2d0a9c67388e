//! Quill Test Suite
//!
//! A fluent test API for the Quill binder and semantic model.
//!
//! Queries are written with the [`dsl`] and bound against one of the
//! [`catalogs`]. Expectations refer to syntax nodes by the text they cover.
//!
//! # Example
//!
//! ```
//! use quill_test_suite::dsl::*;
//! use quill_test_suite::*;
//!
//! Test::new(
//!     catalogs::orders(),
//!     select([qualified("o", "Id")])
//!         .from(table("Orders").alias("o"))
//!         .where_(qualified("o", "Total").gt(int(100))),
//! )
//! .expect(NoDiagnostics)
//! .expect(SymbolOf::new("o.Id").is(SymbolKind::TableColumnInstance).has_type(Ty::Int32))
//! .expect(TypeOf::new("100").is(Ty::Int32))
//! .expect(DeclaredSymbolOf::new("Orders o").is(SymbolKind::TableInstance).named("o"));
//! ```

pub mod catalogs;
pub mod dsl;

use std::sync::Arc;

use quill_compiler::{
    Compilation, CompilationOptions, DataContext, DiagnosticContext, SemanticModel, SyntaxNode,
};
use quill_syntax_tree::ast::Expression;
use quill_syntax_tree::{AstNode, SyntaxTree};

use dsl::IntoSyntaxTree;

// Re-export commonly used types
pub use quill_binder::{DiagnosticId, Symbol, SymbolKind};
pub use quill_symbols::{Conversion, Ty};

/// The bound query an expectation is checked against.
pub struct TestContext {
    pub model: SemanticModel,
    /// Source text of the query
    pub text: String,
}

impl TestContext {
    /// The `nth` expression node whose text is `text`, in tree order.
    pub fn expression(&self, text: &str, nth: usize) -> Result<SyntaxNode, String> {
        self.find(text, nth, |node| Expression::can_cast(node.kind()))
            .ok_or_else(|| format!("No expression '{}' (occurrence {}) in '{}'", text, nth, self.text))
    }

    /// The first node whose text is `text` and that declares a symbol.
    pub fn declaration(&self, text: &str) -> Result<SyntaxNode, String> {
        self.find(text, 0, |node| self.model.declared_symbol(node).is_some())
            .ok_or_else(|| format!("No declaration '{}' in '{}'", text, self.text))
    }

    fn find(&self, text: &str, nth: usize, filter: impl Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        self.model
            .binding_result()
            .root()
            .descendants()
            .filter(|node| node.text() == text && filter(node))
            .nth(nth)
    }

    /// Offset of the first occurrence of `text` in the query.
    pub fn offset_of(&self, text: &str) -> Result<usize, String> {
        self.text
            .find(text)
            .ok_or_else(|| format!("'{}' does not occur in '{}'", text, self.text))
    }

    fn diagnostic_summary(&self) -> Vec<String> {
        self.model
            .diagnostics()
            .iter()
            .map(|diagnostic| diagnostic.to_string())
            .collect()
    }
}

/// A query bound against a catalog, with expectations applied in order.
pub struct Test {
    data_context: Arc<DataContext>,
    syntax_tree: SyntaxTree,
    options: CompilationOptions,
    context: Option<TestContext>,
}

impl Test {
    /// Create a new test for `query` against `data_context`
    pub fn new(data_context: Arc<DataContext>, query: impl IntoSyntaxTree) -> Self {
        Test {
            data_context,
            syntax_tree: query.into_syntax_tree(),
            options: CompilationOptions::default(),
            context: None,
        }
    }

    /// Bind with `options` instead of the defaults
    pub fn with_options(mut self, options: CompilationOptions) -> Self {
        self.options = options;
        self.context = None;
        self
    }

    /// Bind the query and store the result
    fn compile(&mut self) {
        if self.context.is_some() {
            return; // Already bound
        }

        let compilation = Compilation::builder()
            .syntax_tree(self.syntax_tree.clone())
            .data_context(self.data_context.clone())
            .options(self.options.clone())
            .build();

        self.context = Some(TestContext {
            text: compilation.syntax_tree().text(),
            model: compilation.semantic_model(),
        });
    }

    /// The semantic model of the bound query
    pub fn model(&mut self) -> &SemanticModel {
        self.compile();
        &self.context.as_ref().unwrap().model
    }

    /// Apply an expectation to this test
    pub fn expect<E: Expectable>(mut self, expectation: E) -> Self {
        self.compile();
        let ctx = self.context.as_ref().unwrap();
        if let Err(e) = expectation.check(ctx) {
            // Emit diagnostics for context
            if !ctx.model.diagnostics().is_empty() {
                eprintln!("\n--- Binder Diagnostics ---");
                let mut diagnostics = DiagnosticContext::new();
                ctx.model.emit_diagnostics(&mut diagnostics, "query.sql");
                diagnostics.emit().ok();
            }
            panic!("Expectation failed for '{}': {}", ctx.text, e);
        }
        self
    }
}

/// Trait for test expectations
pub trait Expectable {
    fn check(&self, ctx: &TestContext) -> Result<(), String>;
}

/// Expects binding to succeed without diagnostics
pub struct NoDiagnostics;

impl Expectable for NoDiagnostics {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if ctx.model.diagnostics().is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Expected no diagnostics, but got {:?}",
                ctx.diagnostic_summary()
            ))
        }
    }
}

/// Expects exactly N diagnostics
pub struct HasDiagnosticCount(pub usize);

impl Expectable for HasDiagnosticCount {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let actual = ctx.model.diagnostics().len();
        if actual == self.0 {
            Ok(())
        } else {
            Err(format!(
                "Expected {} diagnostic(s), but got {}: {:?}",
                self.0,
                actual,
                ctx.diagnostic_summary()
            ))
        }
    }
}

/// Expects a diagnostic whose message contains the given text
pub struct HasError(pub &'static str);

impl Expectable for HasError {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let has_matching_error = ctx
            .model
            .diagnostics()
            .iter()
            .any(|diagnostic| diagnostic.message.contains(self.0));

        if has_matching_error {
            Ok(())
        } else {
            Err(format!(
                "Expected an error containing '{}', but got: {:?}",
                self.0,
                ctx.diagnostic_summary()
            ))
        }
    }
}

/// Expects a diagnostic of a given category, optionally at a given piece of
/// text and with a given message fragment
pub struct Reports {
    id: DiagnosticId,
    at: Option<String>,
    containing: Option<String>,
}

impl Reports {
    pub fn new(id: DiagnosticId) -> Self {
        Reports {
            id,
            at: None,
            containing: None,
        }
    }

    /// The diagnostic's span covers exactly `text`
    pub fn at(mut self, text: &str) -> Self {
        self.at = Some(text.to_string());
        self
    }

    pub fn containing(mut self, message: &str) -> Self {
        self.containing = Some(message.to_string());
        self
    }
}

impl Expectable for Reports {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let found = ctx.model.diagnostics().iter().any(|diagnostic| {
            diagnostic.id == self.id
                && self
                    .at
                    .as_ref()
                    .map_or(true, |at| ctx.text.get(diagnostic.span.clone()) == Some(at.as_str()))
                && self
                    .containing
                    .as_ref()
                    .map_or(true, |message| diagnostic.message.contains(message.as_str()))
        });

        if found {
            Ok(())
        } else {
            Err(format!(
                "Expected a {:?} diagnostic{}{}, but got: {:?}",
                self.id,
                self.at
                    .as_ref()
                    .map(|at| format!(" at '{at}'"))
                    .unwrap_or_default(),
                self.containing
                    .as_ref()
                    .map(|message| format!(" containing '{message}'"))
                    .unwrap_or_default(),
                ctx.diagnostic_summary()
            ))
        }
    }
}

/// Checks the symbol an expression refers to
///
/// The expression is found by its text; `nth` picks a later occurrence when
/// the same text appears more than once.
pub struct SymbolOf {
    text: String,
    nth: usize,
    kind: Option<SymbolKind>,
    name: Option<String>,
    ty: Option<Ty>,
    same_as: Vec<(String, usize)>,
    different_from: Vec<(String, usize)>,
}

impl SymbolOf {
    pub fn new(text: &str) -> Self {
        SymbolOf {
            text: text.to_string(),
            nth: 0,
            kind: None,
            name: None,
            ty: None,
            same_as: Vec::new(),
            different_from: Vec::new(),
        }
    }

    /// Use the `nth` occurrence (zero based) of the text
    pub fn nth(mut self, nth: usize) -> Self {
        self.nth = nth;
        self
    }

    /// Assert the symbol is of a specific kind
    pub fn is(mut self, kind: SymbolKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Assert the symbol's type
    pub fn has_type(mut self, ty: Ty) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Assert the symbol is the one the `nth` occurrence of `text` refers to
    pub fn same_as(mut self, text: &str, nth: usize) -> Self {
        self.same_as.push((text.to_string(), nth));
        self
    }

    /// Assert the symbol differs from the one the `nth` occurrence of `text` refers to
    pub fn different_from(mut self, text: &str, nth: usize) -> Self {
        self.different_from.push((text.to_string(), nth));
        self
    }
}

fn symbol_of(ctx: &TestContext, text: &str, nth: usize) -> Result<Symbol, String> {
    let node = ctx.expression(text, nth)?;
    ctx.model
        .symbol(&node)
        .ok_or_else(|| format!("Expression '{}' does not refer to a symbol", text))
}

fn check_symbol(
    symbol: &Symbol,
    label: &str,
    kind: Option<SymbolKind>,
    name: Option<&str>,
) -> Result<(), String> {
    if let Some(kind) = kind {
        if symbol.kind() != kind {
            return Err(format!(
                "'{}' refers to {:?}, expected kind {:?}",
                label, symbol, kind
            ));
        }
    }
    if let Some(name) = name {
        if symbol.name() != name {
            return Err(format!(
                "'{}' refers to '{}', expected '{}'",
                label,
                symbol.name(),
                name
            ));
        }
    }
    Ok(())
}

impl Expectable for SymbolOf {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let symbol = symbol_of(ctx, &self.text, self.nth)?;
        check_symbol(&symbol, &self.text, self.kind, self.name.as_deref())?;

        if let Some(ty) = &self.ty {
            if symbol.ty() != *ty {
                return Err(format!(
                    "'{}' refers to a symbol of type {}, expected {}",
                    self.text,
                    symbol.ty(),
                    ty
                ));
            }
        }

        for (other, nth) in &self.same_as {
            let other_symbol = symbol_of(ctx, other, *nth)?;
            if other_symbol != symbol {
                return Err(format!(
                    "'{}' refers to {:?}, but '{}' refers to {:?}",
                    self.text, symbol, other, other_symbol
                ));
            }
        }

        for (other, nth) in &self.different_from {
            let other_symbol = symbol_of(ctx, other, *nth)?;
            if other_symbol == symbol {
                return Err(format!(
                    "'{}' and '{}' both refer to {:?}",
                    self.text, other, symbol
                ));
            }
        }

        Ok(())
    }
}

/// Checks the type of an expression
pub struct TypeOf {
    text: String,
    nth: usize,
    ty: Option<Ty>,
}

impl TypeOf {
    pub fn new(text: &str) -> Self {
        TypeOf {
            text: text.to_string(),
            nth: 0,
            ty: None,
        }
    }

    pub fn nth(mut self, nth: usize) -> Self {
        self.nth = nth;
        self
    }

    pub fn is(mut self, ty: Ty) -> Self {
        self.ty = Some(ty);
        self
    }
}

impl Expectable for TypeOf {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let node = ctx.expression(&self.text, self.nth)?;
        let actual = ctx
            .model
            .expression_type(&node)
            .ok_or_else(|| format!("Expression '{}' is not bound", self.text))?;

        match &self.ty {
            Some(expected) if actual != *expected => Err(format!(
                "'{}' has type {}, expected {}",
                self.text, actual, expected
            )),
            _ => Ok(()),
        }
    }
}

/// Checks the conversion a CAST performs
pub struct ConversionOf {
    text: String,
    conversion: Conversion,
}

impl ConversionOf {
    pub fn new(text: &str, conversion: Conversion) -> Self {
        ConversionOf {
            text: text.to_string(),
            conversion,
        }
    }
}

impl Expectable for ConversionOf {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let node = ctx.expression(&self.text, 0)?;
        match ctx.model.conversion(&node) {
            Some(actual) if actual == self.conversion => Ok(()),
            actual => Err(format!(
                "'{}' performs {:?}, expected {:?}",
                self.text, actual, self.conversion
            )),
        }
    }
}

/// Checks the symbol a table reference, select column or common table
/// expression declares
pub struct DeclaredSymbolOf {
    text: String,
    kind: Option<SymbolKind>,
    name: Option<String>,
    columns: Option<Vec<String>>,
}

impl DeclaredSymbolOf {
    pub fn new(text: &str) -> Self {
        DeclaredSymbolOf {
            text: text.to_string(),
            kind: None,
            name: None,
            columns: None,
        }
    }

    pub fn is(mut self, kind: SymbolKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Assert the column names of a declared table instance
    pub fn with_columns<'a>(mut self, columns: impl IntoIterator<Item = &'a str>) -> Self {
        self.columns = Some(columns.into_iter().map(str::to_string).collect());
        self
    }
}

impl Expectable for DeclaredSymbolOf {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let node = ctx.declaration(&self.text)?;
        let symbol = ctx
            .model
            .declared_symbol(&node)
            .ok_or_else(|| format!("'{}' declares nothing", self.text))?;
        check_symbol(&symbol, &self.text, self.kind, self.name.as_deref())?;

        if let Some(expected) = &self.columns {
            let instance = symbol
                .as_table_instance()
                .ok_or_else(|| format!("'{}' does not declare a table instance", self.text))?;
            let actual: Vec<&str> = instance.columns().iter().map(|c| c.name()).collect();
            if actual != *expected {
                return Err(format!(
                    "'{}' declares columns {:?}, expected {:?}",
                    self.text, actual, expected
                ));
            }
        }

        Ok(())
    }
}

/// Checks the symbols offered for completion where `text` starts
pub struct LookupAt {
    text: String,
    contains: Vec<String>,
    excludes: Vec<String>,
}

impl LookupAt {
    pub fn new(text: &str) -> Self {
        LookupAt {
            text: text.to_string(),
            contains: Vec::new(),
            excludes: Vec::new(),
        }
    }

    pub fn contains(mut self, name: &str) -> Self {
        self.contains.push(name.to_string());
        self
    }

    pub fn excludes(mut self, name: &str) -> Self {
        self.excludes.push(name.to_string());
        self
    }
}

impl Expectable for LookupAt {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let position = ctx.offset_of(&self.text)?;
        let symbols = ctx.model.lookup_symbols(position);
        let names: Vec<&str> = symbols.iter().map(|s| s.name()).collect();

        for name in &self.contains {
            if !names.contains(&name.as_str()) {
                return Err(format!(
                    "Expected '{}' to be visible at '{}', but found {:?}",
                    name, self.text, names
                ));
            }
        }
        for name in &self.excludes {
            if names.contains(&name.as_str()) {
                return Err(format!(
                    "Expected '{}' not to be visible at '{}'",
                    name, self.text
                ));
            }
        }

        Ok(())
    }
}

/// Checks the symbol shown when hovering where `text` starts
pub struct HoverAt {
    text: String,
    kind: Option<SymbolKind>,
    name: Option<String>,
}

impl HoverAt {
    pub fn new(text: &str) -> Self {
        HoverAt {
            text: text.to_string(),
            kind: None,
            name: None,
        }
    }

    pub fn is(mut self, kind: SymbolKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

impl Expectable for HoverAt {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let position = ctx.offset_of(&self.text)?;
        let symbol = ctx
            .model
            .symbol_at(position)
            .ok_or_else(|| format!("Nothing to hover at '{}'", self.text))?;
        check_symbol(&symbol, &self.text, self.kind, self.name.as_deref())
    }
}

/// Checks the output columns of the whole query
pub struct OutputColumns {
    names: Vec<String>,
    types: Option<Vec<Ty>>,
}

impl OutputColumns {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        OutputColumns {
            names: names.into_iter().map(str::to_string).collect(),
            types: None,
        }
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = Ty>) -> Self {
        self.types = Some(types.into_iter().collect());
        self
    }
}

impl Expectable for OutputColumns {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let root = ctx.model.binding_result().root().clone();
        let query = root
            .first_child()
            .ok_or_else(|| "The tree has no query".to_string())?;
        let bound = ctx
            .model
            .bound_node(&query)
            .and_then(|node| node.as_query())
            .ok_or_else(|| format!("'{}' is not a bound query", query.text()))?;

        let columns = bound.output_columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name()).collect();
        if names != self.names {
            return Err(format!(
                "Query produces columns {:?}, expected {:?}",
                names, self.names
            ));
        }

        if let Some(expected) = &self.types {
            let types: Vec<Ty> = columns.iter().map(|c| c.ty().clone()).collect();
            if types != *expected {
                return Err(format!(
                    "Query produces types {:?}, expected {:?}",
                    types, expected
                ));
            }
        }

        Ok(())
    }
}
