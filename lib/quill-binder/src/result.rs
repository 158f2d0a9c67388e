use std::collections::HashMap;

use quill_syntax_tree::SyntaxNode;

use crate::bound::BoundNode;
use crate::context::BindingContext;
use crate::diagnostics::Diagnostic;
use crate::members::MemberCache;

/// Everything one bind pass produced for a syntax tree.
#[derive(Debug)]
pub struct BindingResult {
    root: SyntaxNode,
    bound_nodes: HashMap<SyntaxNode, BoundNode>,
    binding_contexts: HashMap<SyntaxNode, BindingContext>,
    diagnostics: Vec<Diagnostic>,
    root_context: BindingContext,
    member_cache: MemberCache,
}

impl BindingResult {
    pub(crate) fn new(
        root: SyntaxNode,
        bound_nodes: HashMap<SyntaxNode, BoundNode>,
        binding_contexts: HashMap<SyntaxNode, BindingContext>,
        diagnostics: Vec<Diagnostic>,
        root_context: BindingContext,
        member_cache: MemberCache,
    ) -> Self {
        BindingResult {
            root,
            bound_nodes,
            binding_contexts,
            diagnostics,
            root_context,
            member_cache,
        }
    }

    /// The root of the tree that was bound.
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// The bound node produced for `node`, if it was bound.
    pub fn bound_node(&self, node: &SyntaxNode) -> Option<&BoundNode> {
        self.bound_nodes.get(node)
    }

    /// The scope that was current when `node` was bound, for nodes that
    /// introduce or enter a scope.
    pub fn binding_context(&self, node: &SyntaxNode) -> Option<&BindingContext> {
        self.binding_contexts.get(node)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn root_context(&self) -> &BindingContext {
        &self.root_context
    }

    /// Member lookups made while binding.
    pub fn member_cache(&self) -> &MemberCache {
        &self.member_cache
    }

    pub fn bound_node_count(&self) -> usize {
        self.bound_nodes.len()
    }

    /// Returns true if `node` belongs to the tree that was bound.
    pub fn contains(&self, node: &SyntaxNode) -> bool {
        node.ancestors().last().map(|root| root == self.root).unwrap_or(false)
    }
}
