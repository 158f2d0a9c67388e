//! Read-only queries over one bind pass.
//!
//! A [`SemanticModel`] answers the questions an evaluator or an editor asks
//! about a query: what a name refers to, what type an expression has, which
//! symbols are visible at a caret position. Every query is total. Nodes that
//! were never bound, or that belong to another tree, yield `None`.

use std::sync::Arc;

use parking_lot::Mutex;
use quill_binder::bound::{BoundExpression, BoundNode, BoundTableReference};
use quill_binder::{
    BindingResult, CommonTableExpressionSymbol, Diagnostic, MemberCache, Symbol,
    TableInstanceSymbol,
};
use quill_reporting::DiagnosticContext;
use quill_symbols::{Conversion, MethodSymbol, PropertySymbol, Ty};
use quill_syntax_tree::ast::{
    CommonTableExpression, DerivedTableReference, NamedTableReference, ParenthesizedExpression,
    ParenthesizedQuery, ParenthesizedTableReference,
};
use quill_syntax_tree::{AstNode, SyntaxKind, SyntaxNode, TextSize};

use crate::compilation::Compilation;

/// The bound form of a compilation, with lookups over it.
#[derive(Debug)]
pub struct SemanticModel {
    compilation: Compilation,
    result: BindingResult,
    /// Seeded with the members resolved while binding, so symbols handed out
    /// here are the ones bound expressions refer to
    members: Mutex<MemberCache>,
}

impl SemanticModel {
    pub(crate) fn new(compilation: Compilation, result: BindingResult) -> Self {
        let members = Mutex::new(result.member_cache().clone());
        Self {
            compilation,
            result,
            members,
        }
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    pub fn binding_result(&self) -> &BindingResult {
        &self.result
    }

    /// Diagnostics in the order the binder reported them.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.result.diagnostics()
    }

    pub fn classify_conversion(&self, source: &Ty, target: &Ty) -> Conversion {
        Conversion::classify(source, target)
    }

    /// The bound node for `node`. Parentheses are looked through.
    pub fn bound_node(&self, node: &SyntaxNode) -> Option<&BoundNode> {
        if !self.result.contains(node) {
            tracing::warn!(kind = ?node.kind(), "node does not belong to this compilation");
            return None;
        }

        self.result.bound_node(&unwrap_parentheses(node))
    }

    fn bound_expression(&self, node: &SyntaxNode) -> Option<&BoundExpression> {
        self.bound_node(node)?.as_expression()
    }

    /// The symbol an expression refers to.
    ///
    /// Names that failed to resolve return their bad symbol, so callers can
    /// tell "unresolved" apart from "not a name".
    pub fn symbol(&self, expression: &SyntaxNode) -> Option<Symbol> {
        self.bound_expression(expression)?.symbol()
    }

    pub fn expression_type(&self, expression: &SyntaxNode) -> Option<Ty> {
        self.bound_expression(expression).map(BoundExpression::ty)
    }

    /// The conversion a CAST performs.
    pub fn conversion(&self, cast: &SyntaxNode) -> Option<Conversion> {
        match self.bound_expression(cast)? {
            BoundExpression::Cast(cast) => Some(cast.conversion),
            _ => None,
        }
    }

    /// The symbol a declaring node introduces: the table instance of a table
    /// reference, the symbol of a CTE, the output column of a select column
    /// or the qualifying instance of `t.*`.
    pub fn declared_symbol(&self, node: &SyntaxNode) -> Option<Symbol> {
        match self.bound_node(node)? {
            BoundNode::TableReference(BoundTableReference::Named(named)) => {
                Some(named.instance.clone().into())
            }
            BoundNode::TableReference(BoundTableReference::Derived(derived)) => {
                Some(derived.instance.clone().into())
            }
            BoundNode::CommonTableExpression(cte) => Some(cte.symbol.clone().into()),
            BoundNode::SelectColumn(column) => Some(column.column.clone().into()),
            BoundNode::WildcardSelectColumn(wildcard) => {
                wildcard.table.clone().map(Symbol::from)
            }
            _ => None,
        }
    }

    pub fn declared_symbol_common_table_expression(
        &self,
        cte: &CommonTableExpression,
    ) -> Option<Arc<CommonTableExpressionSymbol>> {
        match self.bound_node(cte.syntax())? {
            BoundNode::CommonTableExpression(cte) => Some(cte.symbol.clone()),
            _ => None,
        }
    }

    pub fn declared_symbol_named_table(
        &self,
        reference: &NamedTableReference,
    ) -> Option<Arc<TableInstanceSymbol>> {
        match self.bound_node(reference.syntax())?.as_table_reference()? {
            BoundTableReference::Named(named) => Some(named.instance.clone()),
            _ => None,
        }
    }

    pub fn declared_symbol_derived_table(
        &self,
        reference: &DerivedTableReference,
    ) -> Option<Arc<TableInstanceSymbol>> {
        match self.bound_node(reference.syntax())?.as_table_reference()? {
            BoundTableReference::Derived(derived) => Some(derived.instance.clone()),
            _ => None,
        }
    }

    /// Every symbol visible at `position`, nearest scope first.
    ///
    /// Each table instance is followed directly by its column instances, so a
    /// completion list offers both `o` and the columns reachable through it.
    /// A position outside every scoped node sees the root scope, so the
    /// catalog's tables, functions and variables are still offered there
    /// instead of nothing.
    pub fn lookup_symbols(&self, position: usize) -> Vec<Symbol> {
        let root = self.result.root();
        let context = closest_node_with_context(&self.result, root, position, 0)
            .and_then(|node| self.result.binding_context(&node).cloned())
            .unwrap_or_else(|| self.result.root_context().clone());

        let mut symbols = Vec::new();
        for symbol in context.lookup_symbols() {
            let columns = symbol
                .as_table_instance()
                .map(|instance| instance.columns().to_vec())
                .unwrap_or_default();

            symbols.push(symbol);
            symbols.extend(columns.into_iter().map(Symbol::from));
        }
        symbols
    }

    /// The symbol named by the identifier at `position`, for hover.
    pub fn symbol_at(&self, position: usize) -> Option<Symbol> {
        let root = self.result.root();
        let offset = TextSize::try_from(position).ok()?;
        if offset > root.text_range().end() {
            return None;
        }

        let token = root
            .token_at_offset(offset)
            .find(|token| token.kind() == SyntaxKind::Identifier)?;

        // The nearest bound ancestor owns the identifier
        let owner = token
            .parent()
            .into_iter()
            .flat_map(|parent| parent.ancestors())
            .find(|node| self.result.bound_node(node).is_some())?;

        // The table name of a named reference shows the table, its alias the instance
        if let Some(reference) = NamedTableReference::cast(owner.clone()) {
            if reference.table_name().as_ref() == Some(&token) {
                return self
                    .declared_symbol_named_table(&reference)
                    .map(|instance| instance.table().to_symbol());
            }
        }

        self.symbol(&owner).or_else(|| self.declared_symbol(&owner))
    }

    /// The methods callable on values of `ty`.
    pub fn lookup_methods(&self, ty: &Ty) -> Vec<Arc<MethodSymbol>> {
        self.members
            .lock()
            .methods(self.compilation.data_context(), ty)
    }

    /// The properties readable on values of `ty`.
    pub fn lookup_properties(&self, ty: &Ty) -> Vec<Arc<PropertySymbol>> {
        self.members
            .lock()
            .properties(self.compilation.data_context(), ty)
    }

    /// Adds this model's diagnostics to `context` against the query text,
    /// registered under `name`. Returns the file id.
    pub fn emit_diagnostics(&self, context: &mut DiagnosticContext, name: &str) -> usize {
        let file_id = context.add_file(name, self.compilation.syntax_tree().text());
        context.extend(self.diagnostics(), file_id);
        file_id
    }
}

/// Parenthesized nodes are never bound; their content stands in for them.
fn unwrap_parentheses(node: &SyntaxNode) -> SyntaxNode {
    let mut node = node.clone();
    loop {
        let inner = match node.kind() {
            SyntaxKind::ParenthesizedExpression => ParenthesizedExpression::cast(node.clone())
                .and_then(|p| p.expression())
                .map(|e| e.syntax().clone()),
            SyntaxKind::ParenthesizedQuery => ParenthesizedQuery::cast(node.clone())
                .and_then(|p| p.query())
                .map(|q| q.syntax().clone()),
            SyntaxKind::ParenthesizedTableReference => {
                ParenthesizedTableReference::cast(node.clone())
                    .and_then(|p| p.table_reference())
                    .map(|r| r.syntax().clone())
            }
            _ => None,
        };

        match inner {
            Some(inner) => node = inner,
            None => return node,
        }
    }
}

/// Descends from `node` towards `position`, returning the innermost node
/// with a recorded scope. `last_end` is where the previous sibling ended.
fn closest_node_with_context(
    result: &BindingResult,
    node: &SyntaxNode,
    position: usize,
    mut last_end: usize,
) -> Option<SyntaxNode> {
    for child in node.children_with_tokens() {
        let end: usize = child.text_range().end().into();

        if last_end <= position && position < end {
            let child = child.into_node()?;

            if let Some(found) = closest_node_with_context(result, &child, position, last_end) {
                return Some(found);
            }
            if result.binding_context(&child).is_some() {
                return Some(child);
            }
        }

        last_end = end;
    }

    None
}
