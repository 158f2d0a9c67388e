//! Query resolution.
//!
//! This module binds SELECT queries (with TOP), set operations, ORDER BY and
//! WITH clauses, and decides which scope each clause is bound in:
//!
//! - A SELECT's FROM clause is bound in the enclosing scope. Everything else
//!   in the SELECT sees a new scope holding its table instances.
//! - ORDER BY sees the output columns of its query first, then the scope of
//!   the SELECT it orders.
//! - Each common table expression sees the ones declared before it. The main
//!   query sees all of them.

use std::sync::Arc;

use quill_symbols::{ColumnSymbol, Ty};
use quill_syntax_tree::ast::{
    CombinedQuery, CombinedQueryOperator, CommonTableExpressionQuery, Expression,
    ExpressionSelectColumn, OrderedQuery, Query, SelectColumn, SelectQuery, TopClause,
    WildcardSelectColumn,
};
use quill_syntax_tree::{AstNode, SyntaxKind};

use crate::bound::{
    BoundCombinedQuery, BoundCommonTableExpression, BoundCommonTableExpressionQuery,
    BoundExpression, BoundNode, BoundOrderByColumn, BoundOrderedQuery, BoundQuery,
    BoundSelectColumn, BoundSelectItem, BoundSelectQuery, BoundTopQuery,
    BoundValueSlotExpression, BoundWildcardSelectColumn,
};
use crate::context::{BindingContext, Scope};
use crate::diagnostics::{
    AmbiguousReferenceError, ColumnCountMismatchError, InvalidLiteralError, NameKind,
    OrderByOrdinalError, SetOperationTypeMismatchError, ShapeContext, UnresolvedNameError,
};
use crate::symbols::{
    CommonTableExpressionSymbol, QueryColumnInstanceSymbol, TableInstanceSymbol, ValueSlot,
};
use crate::utils::{get_node_span, get_token_span, identifier_text, select_by_name};

use super::expressions::{bind_expression, bind_optional_expression, check_condition};
use super::operators::common_type;
use super::tables::bind_table_reference;
use super::BindingPass;

/// Resolve any query and record it for its syntax node.
pub(crate) fn bind_query(query: &Query, pass: &mut BindingPass) -> BoundQuery {
    let bound = match query {
        Query::ParenthesizedQuery(parenthesized) => {
            return bind_optional_query(parenthesized.query(), pass);
        }
        Query::SelectQuery(select) => bind_select_query(select, pass),
        Query::CombinedQuery(combined) => bind_combined_query(combined, pass),
        Query::OrderedQuery(ordered) => bind_ordered_query(ordered, pass),
        Query::CommonTableExpressionQuery(query) => bind_common_table_expression_query(query, pass),
    };

    pass.record(query.syntax(), BoundNode::Query(bound.clone()));
    bound
}

fn bind_optional_query(query: Option<Query>, pass: &mut BindingPass) -> BoundQuery {
    match query {
        Some(query) => bind_query(&query, pass),
        None => BoundQuery::empty(),
    }
}

fn query_column(name: impl Into<String>, ty: Ty) -> Arc<QueryColumnInstanceSymbol> {
    let name = name.into();
    let slot = ValueSlot::new(name.clone(), ty);
    Arc::new(QueryColumnInstanceSymbol::new(name, slot))
}

// ===== SELECT =====

fn bind_select_query(select: &SelectQuery, pass: &mut BindingPass) -> BoundQuery {
    // FROM first, in the enclosing scope
    let from: Vec<_> = match select.from_clause() {
        Some(from) => from
            .table_references()
            .map(|reference| bind_table_reference(&reference, pass))
            .collect(),
        None => Vec::new(),
    };
    let instances: Vec<Arc<TableInstanceSymbol>> =
        from.iter().flat_map(|reference| reference.table_instances()).collect();

    let context = pass.context().child(Scope::Tables(instances.clone()));
    let select_clause = select.select_clause();

    let query = pass.in_context(context, |pass| {
        pass.record_context(select.syntax());

        let predicate = select.where_clause().map(|clause| {
            let predicate = bind_optional_expression(clause.predicate(), pass);
            check_condition(&predicate, clause.syntax(), "WHERE", pass);
            predicate
        });

        let group_by = match select.group_by_clause() {
            Some(clause) => clause
                .expressions()
                .map(|expression| bind_expression(&expression, pass))
                .collect(),
            None => Vec::new(),
        };

        let having = select.having_clause().map(|clause| {
            let predicate = bind_optional_expression(clause.predicate(), pass);
            check_condition(&predicate, clause.syntax(), "HAVING", pass);
            predicate
        });

        let mut select_list = Vec::new();
        let mut output_columns = Vec::new();
        if let Some(clause) = &select_clause {
            for column in clause.columns() {
                match column {
                    SelectColumn::ExpressionSelectColumn(column) => {
                        let bound = bind_expression_select_column(&column, pass);
                        output_columns.push(bound.column.clone());
                        select_list.push(BoundSelectItem::Column(bound));
                    }
                    SelectColumn::WildcardSelectColumn(wildcard) => {
                        let bound = bind_wildcard_select_column(&wildcard, &instances, pass);
                        output_columns.extend(bound.columns.iter().map(|(_, column)| column.clone()));
                        select_list.push(BoundSelectItem::Wildcard(bound));
                    }
                }
            }
        }

        BoundQuery::Select(Arc::new(BoundSelectQuery {
            is_distinct: select_clause.as_ref().is_some_and(|clause| clause.is_distinct()),
            from,
            predicate,
            group_by,
            having,
            select_list,
            output_columns,
        }))
    });

    match select_clause.and_then(|clause| clause.top_clause()) {
        Some(top) => bind_top(&top, query, pass),
        None => query,
    }
}

/// The name a select column gets when it has no alias.
fn inferred_name(expression: &Expression) -> String {
    let token = match expression {
        Expression::NameExpression(name) => name.name(),
        Expression::PropertyAccessExpression(access) => access.name(),
        Expression::VariableExpression(variable) => variable.name(),
        Expression::ParenthesizedExpression(parenthesized) => {
            return parenthesized
                .expression()
                .map(|inner| inferred_name(&inner))
                .unwrap_or_default();
        }
        _ => None,
    };
    token.map(|token| identifier_text(&token)).unwrap_or_default()
}

fn bind_expression_select_column(
    column: &ExpressionSelectColumn,
    pass: &mut BindingPass,
) -> Arc<BoundSelectColumn> {
    let expression = bind_optional_expression(column.expression(), pass);

    let name = column
        .alias()
        .and_then(|alias| alias.name())
        .map(|token| identifier_text(&token))
        .or_else(|| column.expression().map(|expression| inferred_name(&expression)))
        .unwrap_or_default();

    let bound = Arc::new(BoundSelectColumn {
        column: query_column(name, expression.ty()),
        expression,
    });
    pass.record(column.syntax(), BoundNode::SelectColumn(bound.clone()));
    bound
}

/// Expand `*` to the columns of every instance in this SELECT's FROM clause,
/// or `t.*` to the columns of instance `t`.
fn bind_wildcard_select_column(
    wildcard: &WildcardSelectColumn,
    instances: &[Arc<TableInstanceSymbol>],
    pass: &mut BindingPass,
) -> Arc<BoundWildcardSelectColumn> {
    let (table, expanded) = match wildcard.table_name() {
        Some(token) => {
            let name = identifier_text(&token);
            let found = select_by_name(instances, &name, pass.case_sensitive(), |i| i.name());
            match found.as_slice() {
                [instance] => (Some((*instance).clone()), vec![(*instance).clone()]),
                [] => {
                    pass.report(UnresolvedNameError {
                        span: get_token_span(&token),
                        name,
                        kind: NameKind::Table,
                    });
                    (None, Vec::new())
                }
                candidates => {
                    pass.report(AmbiguousReferenceError {
                        span: get_token_span(&token),
                        name,
                        candidates: candidates.iter().map(|i| i.name().to_string()).collect(),
                    });
                    (None, Vec::new())
                }
            }
        }
        None => (None, instances.to_vec()),
    };

    let columns = expanded
        .iter()
        .flat_map(|instance| instance.columns())
        .map(|column| {
            let output = query_column(column.name(), column.ty().clone());
            (column.clone(), output)
        })
        .collect();

    let bound = Arc::new(BoundWildcardSelectColumn { table, columns });
    pass.record(wildcard.syntax(), BoundNode::WildcardSelectColumn(bound.clone()));
    bound
}

/// Wrap a SELECT in `TOP n [WITH TIES]`
fn bind_top(top: &TopClause, input: BoundQuery, pass: &mut BindingPass) -> BoundQuery {
    let limit = match top.value() {
        Some(token) if token.kind() == SyntaxKind::NumericLiteral => {
            match token.text().parse::<u64>() {
                Ok(limit) => Some(limit),
                Err(_) => {
                    pass.report(InvalidLiteralError {
                        span: get_token_span(&token),
                        text: token.text().to_string(),
                        expected: "TOP row count",
                    });
                    None
                }
            }
        }
        Some(token) => {
            pass.report(InvalidLiteralError {
                span: get_token_span(&token),
                text: token.text().to_string(),
                expected: "TOP row count",
            });
            None
        }
        None => None,
    };

    BoundQuery::Top(Arc::new(BoundTopQuery {
        input,
        limit: limit.unwrap_or(0),
        with_ties: top.with_ties(),
    }))
}

// ===== Set operations =====

/// Resolve `left UNION [ALL] | INTERSECT | EXCEPT right`
///
/// The output columns take their names from the left side and the common
/// type of both sides.
fn bind_combined_query(combined: &CombinedQuery, pass: &mut BindingPass) -> BoundQuery {
    let span = get_node_span(combined.syntax());
    let left = bind_optional_query(combined.left(), pass);
    let right = bind_optional_query(combined.right(), pass);

    let (left_columns, right_columns) = (left.output_columns(), right.output_columns());
    let output_columns = if left_columns.len() != right_columns.len() {
        pass.report(ColumnCountMismatchError {
            span,
            context: ShapeContext::SetOperation,
            expected: left_columns.len(),
            found: right_columns.len(),
        });
        left_columns
            .iter()
            .map(|column| query_column(column.name(), column.ty().clone()))
            .collect()
    } else {
        left_columns
            .iter()
            .zip(right_columns)
            .enumerate()
            .map(|(ordinal, (l, r))| {
                let ty = match common_type(l.ty(), r.ty()) {
                    Some(ty) => ty,
                    None => {
                        pass.report(SetOperationTypeMismatchError {
                            span: span.clone(),
                            ordinal,
                            left: l.ty().clone(),
                            right: r.ty().clone(),
                        });
                        Ty::Unknown
                    }
                };
                query_column(l.name(), ty)
            })
            .collect()
    };

    BoundQuery::Combined(Arc::new(BoundCombinedQuery {
        operator: combined.operator().unwrap_or(CombinedQueryOperator::Union),
        left,
        right,
        output_columns,
    }))
}

// ===== ORDER BY =====

/// The scope ORDER BY falls back to after the output columns: the ordered
/// SELECT's own scope when it orders a plain SELECT.
fn order_by_base_context(query: Option<&Query>, pass: &BindingPass) -> BindingContext {
    match query {
        Some(Query::SelectQuery(select)) => pass
            .binding_context(select.syntax())
            .cloned()
            .unwrap_or_else(|| pass.context().clone()),
        _ => pass.context().clone(),
    }
}

/// Resolve `query ORDER BY columns`
fn bind_ordered_query(ordered: &OrderedQuery, pass: &mut BindingPass) -> BoundQuery {
    let inner = ordered.query();
    let input = bind_optional_query(inner.clone(), pass);

    let base = order_by_base_context(inner.as_ref(), pass);
    let context = base.child(Scope::QueryColumns(input.output_columns().to_vec()));

    let columns = pass.in_context(context, |pass| {
        pass.record_context(ordered.syntax());

        ordered
            .columns()
            .map(|column| {
                let expression = match column.expression() {
                    Some(expression) => bind_order_by_expression(&expression, &input, pass),
                    None => BoundExpression::error(),
                };
                BoundOrderByColumn {
                    expression,
                    descending: column.is_descending(),
                }
            })
            .collect()
    });

    BoundQuery::Ordered(Arc::new(BoundOrderedQuery { input, columns }))
}

/// An integer literal in ORDER BY refers to an output column by position.
fn bind_order_by_expression(
    expression: &Expression,
    input: &BoundQuery,
    pass: &mut BindingPass,
) -> BoundExpression {
    let Expression::LiteralExpression(literal) = expression else {
        return bind_expression(expression, pass);
    };
    let Some(token) = literal.token().filter(|t| t.kind() == SyntaxKind::NumericLiteral) else {
        return bind_expression(expression, pass);
    };
    let Ok(ordinal) = token.text().parse::<i64>() else {
        return bind_expression(expression, pass);
    };

    let columns = input.output_columns();
    let index = usize::try_from(ordinal).ok().and_then(|o| o.checked_sub(1));
    match index.and_then(|index| columns.get(index)) {
        Some(column) => {
            let bound = BoundExpression::ValueSlot(Arc::new(BoundValueSlotExpression {
                slot: column.value_slot().clone(),
            }));
            pass.record(expression.syntax(), BoundNode::Expression(bound.clone()));
            bound
        }
        None => {
            pass.report(OrderByOrdinalError {
                span: get_token_span(&token),
                ordinal,
                column_count: columns.len(),
            });
            bind_expression(expression, pass)
        }
    }
}

// ===== WITH =====

/// Resolve `WITH a AS (...), b AS (...) query`
fn bind_common_table_expression_query(
    query: &CommonTableExpressionQuery,
    pass: &mut BindingPass,
) -> BoundQuery {
    let outer = pass.context().clone();
    let mut symbols: Vec<Arc<CommonTableExpressionSymbol>> = Vec::new();
    let mut common_table_expressions = Vec::new();

    for cte in query.common_table_expressions() {
        // Each definition sees the ones before it, but not itself
        let context = if symbols.is_empty() {
            outer.clone()
        } else {
            outer.child(Scope::CommonTableExpressions(symbols.clone()))
        };

        let bound_query = pass.in_context(context, |pass| {
            pass.record_context(cte.syntax());
            bind_optional_query(cte.query(), pass)
        });

        let name = cte
            .name()
            .map(|token| identifier_text(&token))
            .unwrap_or_default();

        let output = bound_query.output_columns();
        let names: Option<Vec<String>> = cte
            .column_name_list()
            .map(|list| list.names().map(|token| identifier_text(&token)).collect());

        if let (Some(names), Some(list)) = (&names, cte.column_name_list()) {
            if names.len() != output.len() {
                pass.report(ColumnCountMismatchError {
                    span: get_node_span(list.syntax()),
                    context: ShapeContext::ColumnNameList,
                    expected: names.len(),
                    found: output.len(),
                });
            }
        }

        let columns = output
            .iter()
            .enumerate()
            .map(|(ordinal, column)| {
                let name = names
                    .as_ref()
                    .and_then(|names| names.get(ordinal))
                    .map(String::as_str)
                    .unwrap_or(column.name());
                Arc::new(ColumnSymbol::new(name, column.ty().clone(), ordinal))
            })
            .collect();

        tracing::trace!(%name, "declared common table expression");
        let symbol = Arc::new(CommonTableExpressionSymbol::new(name, columns, bound_query));
        let bound = Arc::new(BoundCommonTableExpression {
            symbol: symbol.clone(),
        });
        pass.record(cte.syntax(), BoundNode::CommonTableExpression(bound.clone()));

        symbols.push(symbol);
        common_table_expressions.push(bound);
    }

    let context = outer.child(Scope::CommonTableExpressions(symbols));
    let main = pass.in_context(context, |pass| {
        pass.record_context(query.syntax());
        bind_optional_query(query.query(), pass)
    });

    BoundQuery::CommonTableExpression(Arc::new(BoundCommonTableExpressionQuery {
        common_table_expressions,
        query: main,
    }))
}
