//! Query binding.
//!
//! Binding walks a syntax tree once, resolving names against the scope chain,
//! computing types and recording a bound node and (where one is entered) a
//! binding context for each syntax node. It never stops at the first error:
//! failures become diagnostics plus error placeholders, and binding carries on.
//!
//! # Module Structure
//!
//! - [`queries`]: SELECT, set operations, ORDER BY, TOP and WITH
//! - [`tables`]: FROM clause table references and joins
//! - [`expressions`]: Core expression dispatcher, names, literals, CASE, subselects
//! - [`calls`]: Function, aggregate and method invocations, overload resolution
//! - [`operators`]: Unary and binary operator typing

mod calls;
mod expressions;
mod operators;
mod queries;
mod tables;

use std::collections::HashMap;
use std::sync::Arc;

use quill_symbols::DataContext;
use quill_syntax_tree::ast::{CompilationUnit, Expression, Query};
use quill_syntax_tree::{AstNode, SyntaxNode};

use crate::bound::BoundNode;
use crate::context::BindingContext;
use crate::diagnostics::Diagnostic;
use crate::members::MemberCache;
use crate::result::BindingResult;

/// Binds syntax trees against a data context.
#[derive(Debug, Clone)]
pub struct Binder {
    data_context: Arc<DataContext>,
    case_sensitive: bool,
    max_diagnostics: Option<usize>,
}

impl Binder {
    pub fn new(data_context: Arc<DataContext>) -> Self {
        Binder {
            data_context,
            case_sensitive: false,
            max_diagnostics: None,
        }
    }

    /// Compare identifiers exactly instead of ignoring case.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Stop recording diagnostics after `limit` of them. Binding itself
    /// always runs to completion.
    pub fn max_diagnostics(mut self, limit: Option<usize>) -> Self {
        self.max_diagnostics = limit;
        self
    }

    pub fn data_context(&self) -> &Arc<DataContext> {
        &self.data_context
    }

    /// Binds the tree rooted at `root`.
    ///
    /// The root is normally a `CompilationUnit`, but a bare query or
    /// expression node is accepted as well.
    pub fn bind(&self, root: &SyntaxNode) -> BindingResult {
        tracing::debug!(kind = ?root.kind(), "binding started");

        let root_context = BindingContext::root(self.data_context.clone());
        let mut pass = BindingPass::new(self, root_context.clone());
        pass.record_context(root);

        if let Some(unit) = CompilationUnit::cast(root.clone()) {
            if let Some(query) = unit.query() {
                queries::bind_query(&query, &mut pass);
            } else if let Some(expression) = unit.expression() {
                expressions::bind_expression(&expression, &mut pass);
            }
        } else if let Some(query) = Query::cast(root.clone()) {
            queries::bind_query(&query, &mut pass);
        } else if let Some(expression) = Expression::cast(root.clone()) {
            expressions::bind_expression(&expression, &mut pass);
        } else {
            tracing::warn!(kind = ?root.kind(), "root is neither a query nor an expression");
        }

        tracing::debug!(
            bound_nodes = pass.bound_nodes.len(),
            contexts = pass.binding_contexts.len(),
            diagnostics = pass.diagnostics.len(),
            "binding finished"
        );

        BindingResult::new(
            root.clone(),
            pass.bound_nodes,
            pass.binding_contexts,
            pass.diagnostics,
            root_context,
            pass.members,
        )
    }
}

/// Mutable state of a single bind pass.
pub(crate) struct BindingPass<'a> {
    /// Settings and catalog
    binder: &'a Binder,
    /// The innermost scope
    context: BindingContext,
    bound_nodes: HashMap<SyntaxNode, BoundNode>,
    binding_contexts: HashMap<SyntaxNode, BindingContext>,
    diagnostics: Vec<Diagnostic>,
    /// Diagnostics dropped after `max_diagnostics` was reached
    suppressed: usize,
    members: MemberCache,
}

impl<'a> BindingPass<'a> {
    fn new(binder: &'a Binder, context: BindingContext) -> Self {
        BindingPass {
            binder,
            context,
            bound_nodes: HashMap::new(),
            binding_contexts: HashMap::new(),
            diagnostics: Vec::new(),
            suppressed: 0,
            members: MemberCache::new(),
        }
    }

    pub(crate) fn case_sensitive(&self) -> bool {
        self.binder.case_sensitive
    }

    pub(crate) fn data_context(&self) -> &Arc<DataContext> {
        &self.binder.data_context
    }

    pub(crate) fn context(&self) -> &BindingContext {
        &self.context
    }

    /// Runs `f` with `context` as the innermost scope, then restores the
    /// previous scope.
    pub(crate) fn in_context<T>(
        &mut self,
        context: BindingContext,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        tracing::trace!(?context, "entering scope");
        let previous = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = previous;
        result
    }

    pub(crate) fn record(&mut self, node: &SyntaxNode, bound: BoundNode) {
        self.bound_nodes.insert(node.clone(), bound);
    }

    /// Associates the current scope with `node`.
    pub(crate) fn record_context(&mut self, node: &SyntaxNode) {
        self.binding_contexts.insert(node.clone(), self.context.clone());
    }

    /// The scope recorded for `node` earlier in this pass.
    pub(crate) fn binding_context(&self, node: &SyntaxNode) -> Option<&BindingContext> {
        self.binding_contexts.get(node)
    }

    pub(crate) fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();

        if let Some(limit) = self.binder.max_diagnostics {
            if self.diagnostics.len() >= limit {
                self.suppressed += 1;
                tracing::trace!(suppressed = self.suppressed, "diagnostic limit reached");
                return;
            }
        }

        tracing::trace!(%diagnostic, "reported");
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn members(&mut self) -> (&DataContext, &mut MemberCache) {
        (&self.binder.data_context, &mut self.members)
    }
}
