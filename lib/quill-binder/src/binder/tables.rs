//! FROM clause resolution.
//!
//! Every table reference produces table instances. Named and derived
//! references are bound in the enclosing scope, except that the right side of
//! an inner or left join also sees the left side's instances. A join
//! introduces a scope holding the instances of both sides, in which its ON
//! condition is bound.

use std::sync::Arc;

use quill_symbols::ColumnSymbol;
use quill_syntax_tree::ast::{
    DerivedTableReference, JoinType, JoinedTableReference, NamedTableReference, TableReference,
};
use quill_syntax_tree::AstNode;

use crate::bound::{
    BoundDerivedTableReference, BoundJoinedTableReference, BoundNamedTableReference, BoundNode,
    BoundQuery, BoundTableReference,
};
use crate::context::Scope;
use crate::diagnostics::{NameKind, UnresolvedNameError};
use crate::symbols::{BadTableSymbol, DerivedTableSymbol, TableInstanceSymbol, TableRef};
use crate::utils::{get_token_span, identifier_text};

use super::expressions::{bind_optional_expression, check_condition};
use super::queries::bind_query;
use super::BindingPass;

/// Resolve a table reference and record it for its syntax node.
pub(crate) fn bind_table_reference(
    reference: &TableReference,
    pass: &mut BindingPass,
) -> BoundTableReference {
    let bound = match reference {
        TableReference::ParenthesizedTableReference(parenthesized) => {
            return match parenthesized.table_reference() {
                Some(inner) => bind_table_reference(&inner, pass),
                None => missing_table(),
            };
        }
        TableReference::NamedTableReference(named) => bind_named_table_reference(named, pass),
        TableReference::DerivedTableReference(derived) => {
            bind_derived_table_reference(derived, pass)
        }
        TableReference::JoinedTableReference(joined) => bind_joined_table_reference(joined, pass),
    };

    pass.record(reference.syntax(), BoundNode::TableReference(bound.clone()));
    bound
}

/// Placeholder for a table reference absent from the tree.
fn missing_table() -> BoundTableReference {
    let table = TableRef::Bad(Arc::new(BadTableSymbol::new("")));
    BoundTableReference::Named(Arc::new(BoundNamedTableReference {
        instance: TableInstanceSymbol::new("", table),
    }))
}

fn bind_optional_table_reference(
    reference: Option<TableReference>,
    pass: &mut BindingPass,
) -> BoundTableReference {
    match reference {
        Some(reference) => bind_table_reference(&reference, pass),
        None => missing_table(),
    }
}

/// Resolve `name [AS alias]`.
///
/// Common table expressions in scope shadow schema tables of the same name.
fn bind_named_table_reference(
    reference: &NamedTableReference,
    pass: &mut BindingPass,
) -> BoundTableReference {
    let Some(name_token) = reference.table_name() else {
        return missing_table();
    };
    let name = identifier_text(&name_token);
    let case_sensitive = pass.case_sensitive();

    let table = if let Some(cte) = pass
        .context()
        .lookup_common_table_expression(&name, case_sensitive)
    {
        TableRef::CommonTableExpression(cte)
    } else if let Some(table) = pass.context().lookup_schema_table(&name, case_sensitive) {
        TableRef::Schema(table)
    } else {
        tracing::trace!(%name, "table not found");
        pass.report(UnresolvedNameError {
            span: get_token_span(&name_token),
            name: name.clone(),
            kind: NameKind::Table,
        });
        TableRef::Bad(Arc::new(BadTableSymbol::new(name.clone())))
    };

    let instance_name = reference
        .alias()
        .and_then(|alias| alias.name())
        .map(|token| identifier_text(&token))
        .unwrap_or(name);

    BoundTableReference::Named(Arc::new(BoundNamedTableReference {
        instance: TableInstanceSymbol::new(instance_name, table),
    }))
}

/// Resolve `(query) AS name`. The derived table's columns are the query's
/// output columns.
fn bind_derived_table_reference(
    reference: &DerivedTableReference,
    pass: &mut BindingPass,
) -> BoundTableReference {
    let query = match reference.query() {
        Some(query) => bind_query(&query, pass),
        None => BoundQuery::empty(),
    };

    let name = reference
        .name()
        .map(|token| identifier_text(&token))
        .unwrap_or_default();

    let columns = query
        .output_columns()
        .iter()
        .enumerate()
        .map(|(ordinal, column)| {
            Arc::new(ColumnSymbol::new(column.name(), column.ty().clone(), ordinal))
        })
        .collect();
    let table = Arc::new(DerivedTableSymbol::new(name.clone(), columns));

    BoundTableReference::Derived(Arc::new(BoundDerivedTableReference {
        instance: TableInstanceSymbol::new(name, TableRef::Derived(table)),
        query,
    }))
}

/// Resolve `left [type] JOIN right [ON condition]`
fn bind_joined_table_reference(
    reference: &JoinedTableReference,
    pass: &mut BindingPass,
) -> BoundTableReference {
    let join_type = reference.join_type();
    let left = bind_optional_table_reference(reference.left(), pass);

    // The right side of an inner or left join sees the left side's instances
    let right = match join_type {
        JoinType::Inner | JoinType::LeftOuter => {
            let context = pass.context().child(Scope::Tables(left.table_instances()));
            pass.in_context(context, |pass| {
                bind_optional_table_reference(reference.right(), pass)
            })
        }
        JoinType::RightOuter | JoinType::FullOuter | JoinType::Cross => {
            bind_optional_table_reference(reference.right(), pass)
        }
    };

    // The ON condition sees both sides and whatever encloses the FROM clause
    let mut instances = left.table_instances();
    instances.extend(right.table_instances());
    let context = pass.context().child(Scope::Tables(instances));

    let condition = pass.in_context(context, |pass| {
        pass.record_context(reference.syntax());

        reference.condition().map(|condition| {
            let predicate = bind_optional_expression(condition.predicate(), pass);
            check_condition(&predicate, condition.syntax(), "ON", pass);
            predicate
        })
    });

    BoundTableReference::Joined(Arc::new(BoundJoinedTableReference {
        left,
        right,
        join_type,
        condition,
    }))
}
