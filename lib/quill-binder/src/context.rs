//! The scope chain used for name resolution.
//!
//! A [`BindingContext`] is one immutable link of the chain. Children hold a
//! reference to their parent and never modify it, so every context handed
//! out during a bind pass stays valid for as long as the result lives.

use std::fmt;
use std::sync::Arc;

use quill_symbols::{AggregateSymbol, DataContext, FunctionSymbol, SchemaTableSymbol, VariableSymbol};

use crate::symbols::{
    CommonTableExpressionSymbol, QueryColumnInstanceSymbol, Symbol, TableInstanceSymbol,
};
use crate::utils::select_by_name;

/// What a single link of the chain makes visible.
#[derive(Debug)]
pub enum Scope {
    /// The catalog: tables, functions and variables.
    Root(Arc<DataContext>),
    /// Table instances introduced by a FROM clause or a join.
    Tables(Vec<Arc<TableInstanceSymbol>>),
    /// Tables defined by a WITH clause.
    CommonTableExpressions(Vec<Arc<CommonTableExpressionSymbol>>),
    /// Output columns of a query, visible to its ORDER BY.
    QueryColumns(Vec<Arc<QueryColumnInstanceSymbol>>),
}

struct ContextNode {
    parent: Option<BindingContext>,
    scope: Scope,
}

/// A link in the lexical scope chain.
#[derive(Clone)]
pub struct BindingContext(Arc<ContextNode>);

/// Outcome of looking a name up in the chain.
#[derive(Debug, Clone)]
pub enum Resolution<T> {
    Found(T),
    /// Several candidates in the nearest scope that had any.
    Ambiguous(Vec<T>),
    NotFound,
}

impl<T> Resolution<T> {
    fn from_candidates(mut candidates: Vec<T>) -> Self {
        match candidates.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Found(candidates.remove(0)),
            _ => Resolution::Ambiguous(candidates),
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Resolution::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

impl BindingContext {
    pub fn root(data_context: Arc<DataContext>) -> Self {
        BindingContext(Arc::new(ContextNode {
            parent: None,
            scope: Scope::Root(data_context),
        }))
    }

    /// Creates a new innermost scope on top of this one.
    pub fn child(&self, scope: Scope) -> Self {
        BindingContext(Arc::new(ContextNode {
            parent: Some(self.clone()),
            scope,
        }))
    }

    pub fn parent(&self) -> Option<&BindingContext> {
        self.0.parent.as_ref()
    }

    pub fn scope(&self) -> &Scope {
        &self.0.scope
    }

    /// This context followed by its parents, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &BindingContext> {
        std::iter::successors(Some(self), |context| context.parent())
    }

    pub fn data_context(&self) -> &Arc<DataContext> {
        let mut context = self;
        loop {
            if let Scope::Root(data_context) = context.scope() {
                return data_context;
            }
            match context.parent() {
                Some(parent) => context = parent,
                None => unreachable!("every chain ends in a root scope"),
            }
        }
    }

    pub fn ptr_eq(&self, other: &BindingContext) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The symbols declared directly by this link.
    pub fn local_symbols(&self) -> Vec<Symbol> {
        match self.scope() {
            Scope::Root(data_context) => data_context
                .tables()
                .iter()
                .cloned()
                .map(Symbol::from)
                .chain(data_context.functions().iter().cloned().map(Symbol::from))
                .chain(data_context.variables().iter().cloned().map(Symbol::from))
                .collect(),
            Scope::Tables(instances) => instances.iter().cloned().map(Symbol::from).collect(),
            Scope::CommonTableExpressions(ctes) => ctes.iter().cloned().map(Symbol::from).collect(),
            Scope::QueryColumns(columns) => columns.iter().cloned().map(Symbol::from).collect(),
        }
    }

    /// Every visible symbol, nearest scope first.
    pub fn lookup_symbols(&self) -> Vec<Symbol> {
        self.ancestors()
            .flat_map(|context| context.local_symbols())
            .collect()
    }

    /// Looks up a table instance by name, nearest scope first.
    pub fn lookup_table_instance(
        &self,
        name: &str,
        case_sensitive: bool,
    ) -> Resolution<Arc<TableInstanceSymbol>> {
        for context in self.ancestors() {
            if let Scope::Tables(instances) = context.scope() {
                let found = select_by_name(instances, name, case_sensitive, |i| i.name());
                if !found.is_empty() {
                    return Resolution::from_candidates(found.into_iter().cloned().collect());
                }
            }
        }
        Resolution::NotFound
    }

    /// Looks up a value by unqualified name: output columns in ORDER BY
    /// scopes, then columns of table instances, then the instances
    /// themselves. The nearest scope with any candidate decides.
    pub fn lookup_value(&self, name: &str, case_sensitive: bool) -> Resolution<Symbol> {
        for context in self.ancestors() {
            match context.scope() {
                Scope::QueryColumns(columns) => {
                    let found = select_by_name(columns, name, case_sensitive, |c| c.name());
                    if !found.is_empty() {
                        return Resolution::from_candidates(
                            found.into_iter().cloned().map(Symbol::from).collect(),
                        );
                    }
                }
                Scope::Tables(instances) => {
                    let columns: Vec<_> = instances.iter().flat_map(|i| i.columns()).collect();
                    let found = select_by_name(columns, name, case_sensitive, |c| c.name());
                    if !found.is_empty() {
                        return Resolution::from_candidates(
                            found.into_iter().cloned().map(Symbol::from).collect(),
                        );
                    }

                    let found = select_by_name(instances, name, case_sensitive, |i| i.name());
                    if !found.is_empty() {
                        return Resolution::from_candidates(
                            found.into_iter().cloned().map(Symbol::from).collect(),
                        );
                    }
                }
                Scope::Root(_) | Scope::CommonTableExpressions(_) => {}
            }
        }
        Resolution::NotFound
    }

    /// Looks up a common table expression, nearest WITH clause first.
    pub fn lookup_common_table_expression(
        &self,
        name: &str,
        case_sensitive: bool,
    ) -> Option<Arc<CommonTableExpressionSymbol>> {
        self.ancestors().find_map(|context| match context.scope() {
            Scope::CommonTableExpressions(ctes) => {
                select_by_name(ctes, name, case_sensitive, |c| c.name())
                    .first()
                    .map(|cte| (*cte).clone())
            }
            _ => None,
        })
    }

    pub fn lookup_schema_table(
        &self,
        name: &str,
        case_sensitive: bool,
    ) -> Option<Arc<SchemaTableSymbol>> {
        select_by_name(self.data_context().tables(), name, case_sensitive, |t| t.name())
            .first()
            .map(|table| (*table).clone())
    }

    pub fn lookup_functions(&self, name: &str, case_sensitive: bool) -> Vec<Arc<FunctionSymbol>> {
        select_by_name(self.data_context().functions(), name, case_sensitive, |f| f.name())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn lookup_aggregate(&self, name: &str, case_sensitive: bool) -> Option<Arc<AggregateSymbol>> {
        select_by_name(self.data_context().aggregates(), name, case_sensitive, |a| a.name())
            .first()
            .map(|aggregate| (*aggregate).clone())
    }

    pub fn lookup_variable(&self, name: &str, case_sensitive: bool) -> Option<Arc<VariableSymbol>> {
        select_by_name(self.data_context().variables(), name, case_sensitive, |v| v.name())
            .first()
            .map(|variable| (*variable).clone())
    }
}

impl PartialEq for BindingContext {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for BindingContext {}

impl fmt::Debug for BindingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for context in self.ancestors() {
            match context.scope() {
                Scope::Root(_) => list.entry(&"Root"),
                Scope::Tables(instances) => list.entry(&format_args!(
                    "Tables{:?}",
                    instances.iter().map(|i| i.name()).collect::<Vec<_>>()
                )),
                Scope::CommonTableExpressions(ctes) => list.entry(&format_args!(
                    "CommonTableExpressions{:?}",
                    ctes.iter().map(|c| c.name()).collect::<Vec<_>>()
                )),
                Scope::QueryColumns(columns) => list.entry(&format_args!(
                    "QueryColumns{:?}",
                    columns.iter().map(|c| c.name()).collect::<Vec<_>>()
                )),
            };
        }
        list.finish()
    }
}
