//! Expression resolution.
//!
//! [`bind_expression`] dispatches on the expression kind and records the
//! result for the syntax node. Parenthesized expressions are transparent:
//! they bind to their inner expression and get no entry of their own.

use std::sync::Arc;

use quill_span::Name;
use quill_symbols::{Conversion, Ty, Value};
use quill_syntax_tree::ast::{
    AllAnySubselect, CaseExpression, CastExpression, Expression, LiteralExpression,
    NameExpression, PropertyAccessExpression, SingleRowSubselect, VariableExpression,
};
use quill_syntax_tree::{AstNode, SyntaxKind, SyntaxNode};

use crate::bound::{
    BoundAllAnySubselect, BoundCaseExpression, BoundCaseLabel, BoundCastExpression,
    BoundExistsSubselect, BoundExpression, BoundIsNullExpression, BoundLiteralExpression,
    BoundNode, BoundPropertyAccessExpression, BoundQuery, BoundSingleRowSubselect,
    BoundVariableExpression,
};
use crate::context::Resolution;
use crate::diagnostics::{
    AmbiguousReferenceError, ColumnCountMismatchError, ConditionNotBooleanError,
    IncompatibleTypesError, InvalidCastError, InvalidLiteralError, NameKind,
    OperatorTypeMismatchError, ShapeContext, UnresolvedColumnOfTableError, UnresolvedMemberError,
    UnresolvedNameError,
};
use crate::symbols::Symbol;
use crate::utils::{
    get_node_span, get_token_span, identifier_name, identifier_text, select_by_name,
    string_literal_value,
};

use super::calls::{bind_count_all, bind_function_invocation, bind_method_invocation};
use super::operators::{
    bind_binary_expression, bind_unary_expression, binary_result_type, common_type,
    comparison_operator,
};
use super::queries::bind_query;
use super::BindingPass;

/// Resolve any expression and record it for its syntax node.
pub(crate) fn bind_expression(expression: &Expression, pass: &mut BindingPass) -> BoundExpression {
    let bound = match expression {
        Expression::ParenthesizedExpression(parenthesized) => {
            return bind_optional_expression(parenthesized.expression(), pass);
        }
        Expression::NameExpression(name) => bind_name_expression(name, pass),
        Expression::VariableExpression(variable) => bind_variable_expression(variable, pass),
        Expression::LiteralExpression(literal) => bind_literal_expression(literal, pass),
        Expression::UnaryExpression(unary) => bind_unary_expression(unary, pass),
        Expression::BinaryExpression(binary) => bind_binary_expression(binary, pass),
        Expression::PropertyAccessExpression(access) => bind_property_access(access, pass),
        Expression::MethodInvocationExpression(call) => bind_method_invocation(call, pass),
        Expression::FunctionInvocationExpression(call) => bind_function_invocation(call, pass),
        Expression::CountAllExpression(count) => bind_count_all(count, pass),
        Expression::CastExpression(cast) => bind_cast_expression(cast, pass),
        Expression::IsNullExpression(is_null) => {
            let expression = bind_optional_expression(is_null.expression(), pass);
            BoundExpression::IsNull(Arc::new(BoundIsNullExpression {
                expression,
                negated: is_null.is_negated(),
            }))
        }
        Expression::CaseExpression(case) => bind_case_expression(case, pass),
        Expression::SingleRowSubselect(subselect) => bind_single_row_subselect(subselect, pass),
        Expression::ExistsSubselect(exists) => {
            let query = bind_subquery(exists.query(), pass);
            BoundExpression::ExistsSubselect(Arc::new(BoundExistsSubselect { query }))
        }
        Expression::AllAnySubselect(subselect) => bind_all_any_subselect(subselect, pass),
    };

    pass.record(expression.syntax(), BoundNode::Expression(bound.clone()));
    bound
}

/// Binds an expression the parser may have left out.
pub(crate) fn bind_optional_expression(
    expression: Option<Expression>,
    pass: &mut BindingPass,
) -> BoundExpression {
    match expression {
        Some(expression) => bind_expression(&expression, pass),
        None => BoundExpression::error(),
    }
}

/// Reports a condition that is not boolean. `clause` names where it appeared.
pub(crate) fn check_condition(
    condition: &BoundExpression,
    node: &SyntaxNode,
    clause: &'static str,
    pass: &mut BindingPass,
) {
    let ty = condition.ty();
    if !Conversion::classify(&ty, &Ty::Boolean).is_implicit() {
        pass.report(ConditionNotBooleanError {
            span: get_node_span(node),
            clause,
            found: ty,
        });
    }
}

/// How a candidate is shown in an ambiguity diagnostic.
fn describe(symbol: &Symbol) -> String {
    match symbol {
        Symbol::TableColumnInstance(column) => match column.table_instance() {
            Some(instance) => format!("{}.{}", instance.name(), column.name()),
            None => column.name().to_string(),
        },
        other => other.to_string(),
    }
}

/// Resolve an unqualified name to a column, output column or table instance
fn bind_name_expression(expression: &NameExpression, pass: &mut BindingPass) -> BoundExpression {
    let Some(token) = expression.name() else {
        return BoundExpression::error();
    };
    let Name { value: name, span } = identifier_name(&token);

    let resolution = pass.context().lookup_value(&name, pass.case_sensitive());
    let symbol = match resolution {
        Resolution::Found(symbol) => symbol,
        Resolution::Ambiguous(candidates) => {
            pass.report(AmbiguousReferenceError {
                span,
                name: name.clone(),
                candidates: candidates.iter().map(describe).collect(),
            });
            Symbol::bad(name)
        }
        Resolution::NotFound => {
            tracing::trace!(%name, "name not found");
            pass.report(UnresolvedNameError {
                span,
                name: name.clone(),
                kind: NameKind::Column,
            });
            Symbol::bad(name)
        }
    };

    BoundExpression::name(symbol)
}

/// Resolve `@name` against the data context's variables
fn bind_variable_expression(
    expression: &VariableExpression,
    pass: &mut BindingPass,
) -> BoundExpression {
    let Some(token) = expression.name() else {
        return BoundExpression::error();
    };
    let name = identifier_text(&token);

    let symbol = match pass.context().lookup_variable(&name, pass.case_sensitive()) {
        Some(variable) => Symbol::Variable(variable),
        None => {
            pass.report(UnresolvedNameError {
                span: get_node_span(expression.syntax()),
                name: format!("@{name}"),
                kind: NameKind::Variable,
            });
            Symbol::bad(name)
        }
    };

    BoundExpression::Variable(Arc::new(BoundVariableExpression { symbol }))
}

fn bind_literal_expression(
    expression: &LiteralExpression,
    pass: &mut BindingPass,
) -> BoundExpression {
    let Some(token) = expression.token() else {
        return BoundExpression::error();
    };

    let value = match token.kind() {
        SyntaxKind::NumericLiteral => parse_numeric(token.text()),
        SyntaxKind::StringLiteral => Some(Value::string(string_literal_value(token.text()))),
        SyntaxKind::TrueKeyword => Some(Value::Boolean(true)),
        SyntaxKind::FalseKeyword => Some(Value::Boolean(false)),
        SyntaxKind::NullKeyword => Some(Value::Null),
        _ => None,
    };

    let Some(value) = value else {
        pass.report(InvalidLiteralError {
            span: get_token_span(&token),
            text: token.text().to_string(),
            expected: "literal",
        });
        return BoundExpression::Literal(Arc::new(BoundLiteralExpression {
            value: Value::Null,
            ty: Ty::Unknown,
        }));
    };

    let ty = value.ty();
    BoundExpression::Literal(Arc::new(BoundLiteralExpression { value, ty }))
}

/// Numbers with a fraction or exponent are `DOUBLE`. Integers take the
/// narrowest of `INT`, `BIGINT` and `DECIMAL` that holds them.
fn parse_numeric(text: &str) -> Option<Value> {
    if text.contains(['.', 'e', 'E']) {
        return text.parse::<f64>().ok().map(Value::Float64);
    }

    if let Ok(value) = text.parse::<i32>() {
        return Some(Value::Int32(value));
    }
    if let Ok(value) = text.parse::<i64>() {
        return Some(Value::Int64(value));
    }
    text.parse::<i128>()
        .ok()
        .map(|mantissa| Value::Decimal { mantissa, scale: 0 })
}

/// Resolve `a.b`.
///
/// When `a` names a table instance, the result is a reference to its column
/// `b`. Otherwise `a` is bound as a value and `b` is looked up as a property
/// of its type.
fn bind_property_access(
    expression: &PropertyAccessExpression,
    pass: &mut BindingPass,
) -> BoundExpression {
    let (Some(target), Some(name_token)) = (expression.target(), expression.name()) else {
        return BoundExpression::error();
    };
    let Name { value: name, span: name_span } = identifier_name(&name_token);

    if let Expression::NameExpression(qualifier) = &target {
        if let Some(qualifier_token) = qualifier.name() {
            let qualifier_name = identifier_text(&qualifier_token);
            let case_sensitive = pass.case_sensitive();

            match pass.context().lookup_table_instance(&qualifier_name, case_sensitive) {
                Resolution::Found(instance) => {
                    let instance_symbol = Symbol::TableInstance(instance.clone());
                    pass.record(
                        qualifier.syntax(),
                        BoundNode::Expression(BoundExpression::name(instance_symbol)),
                    );

                    let columns = select_by_name(instance.columns(), &name, case_sensitive, |c| c.name());
                    let symbol = match columns.as_slice() {
                        [column] => Symbol::TableColumnInstance((*column).clone()),
                        [] => {
                            // A bad table was already reported where it was declared
                            if !instance.table().is_bad() {
                                pass.report(UnresolvedColumnOfTableError {
                                    span: name_span,
                                    column: name.clone(),
                                    table: instance.name().to_string(),
                                });
                            }
                            Symbol::bad(name)
                        }
                        candidates => {
                            pass.report(AmbiguousReferenceError {
                                span: name_span,
                                name: name.clone(),
                                candidates: candidates
                                    .iter()
                                    .map(|c| describe(&Symbol::TableColumnInstance((*c).clone())))
                                    .collect(),
                            });
                            Symbol::bad(name)
                        }
                    };
                    return BoundExpression::name(symbol);
                }
                Resolution::Ambiguous(instances) => {
                    pass.report(AmbiguousReferenceError {
                        span: get_token_span(&qualifier_token),
                        name: qualifier_name.clone(),
                        candidates: instances.iter().map(|i| i.name().to_string()).collect(),
                    });
                    let bad = BoundExpression::name(Symbol::bad(qualifier_name));
                    pass.record(qualifier.syntax(), BoundNode::Expression(bad.clone()));
                    return property_of(bad, Symbol::bad(name));
                }
                Resolution::NotFound => {
                    if pass
                        .context()
                        .lookup_value(&qualifier_name, case_sensitive)
                        .is_not_found()
                    {
                        pass.report(UnresolvedNameError {
                            span: get_token_span(&qualifier_token),
                            name: qualifier_name.clone(),
                            kind: NameKind::TableOrColumn,
                        });
                        let bad = BoundExpression::name(Symbol::bad(qualifier_name));
                        pass.record(qualifier.syntax(), BoundNode::Expression(bad.clone()));
                        return property_of(bad, Symbol::bad(name));
                    }
                }
            }
        }
    }

    let target = bind_expression(&target, pass);
    let target_type = target.ty();
    if target_type.is_unknown() {
        return property_of(target, Symbol::bad(name));
    }

    let (data_context, cache) = pass.members();
    let properties = cache.properties(data_context, &target_type);
    let found: Vec<_> = select_by_name(&properties, &name, pass.case_sensitive(), |p| p.name())
        .into_iter()
        .cloned()
        .collect();

    let symbol = match found.as_slice() {
        [property] => Symbol::Property(property.clone()),
        [] => {
            pass.report(UnresolvedMemberError {
                span: name_span,
                name: name.clone(),
                kind: NameKind::Property,
                ty: target_type,
            });
            Symbol::bad(name)
        }
        candidates => {
            pass.report(AmbiguousReferenceError {
                span: name_span,
                name: name.clone(),
                candidates: candidates.iter().map(|p| format!("{}.{}", p.host(), p.name())).collect(),
            });
            Symbol::bad(name)
        }
    };

    property_of(target, symbol)
}

fn property_of(target: BoundExpression, symbol: Symbol) -> BoundExpression {
    BoundExpression::PropertyAccess(Arc::new(BoundPropertyAccessExpression { target, symbol }))
}

/// Resolve `CAST(expression AS type)`
fn bind_cast_expression(expression: &CastExpression, pass: &mut BindingPass) -> BoundExpression {
    let span = get_node_span(expression.syntax());
    let operand = bind_optional_expression(expression.expression(), pass);
    let source = operand.ty();

    let type_token = expression.type_reference().and_then(|reference| reference.name());
    let target_type = match &type_token {
        Some(token) => {
            let type_name = identifier_text(token);
            match pass.data_context().resolve_type_name(&type_name) {
                Some(ty) => ty,
                None => {
                    pass.report(UnresolvedNameError {
                        span: get_token_span(token),
                        name: type_name,
                        kind: NameKind::Type,
                    });
                    Ty::Unknown
                }
            }
        }
        None => Ty::Unknown,
    };

    let conversion = Conversion::classify(&source, &target_type);
    let ty = if conversion.exists() {
        target_type.clone()
    } else {
        pass.report(InvalidCastError {
            span,
            from: source,
            to: target_type.clone(),
        });
        Ty::Unknown
    };

    BoundExpression::Cast(Arc::new(BoundCastExpression {
        expression: operand,
        target_type,
        conversion,
        ty,
    }))
}

/// Resolve a simple (`CASE x WHEN ...`) or searched (`CASE WHEN ...`) CASE
fn bind_case_expression(expression: &CaseExpression, pass: &mut BindingPass) -> BoundExpression {
    let input = expression
        .input_expression()
        .map(|input| bind_expression(&input, pass));

    let mut labels = Vec::new();
    for label in expression.labels() {
        let when_node = label.when_expression();
        let when = bind_optional_expression(when_node.clone(), pass);

        match (&input, &when_node) {
            (Some(input), Some(when_node)) => {
                if common_type(&input.ty(), &when.ty()).is_none() {
                    pass.report(IncompatibleTypesError {
                        span: get_node_span(when_node.syntax()),
                        context: "CASE comparison",
                        left: input.ty(),
                        right: when.ty(),
                    });
                }
            }
            (None, Some(when_node)) => check_condition(&when, when_node.syntax(), "WHEN", pass),
            (_, None) => {}
        }

        let then = bind_optional_expression(label.then_expression(), pass);
        let bound = Arc::new(BoundCaseLabel { when, then });
        pass.record(label.syntax(), BoundNode::CaseLabel(bound.clone()));
        labels.push(bound);
    }

    let otherwise = expression
        .else_expression()
        .map(|otherwise| bind_expression(&otherwise, pass));

    // The result type is the common type of every branch that has one
    let mut result: Option<Ty> = None;
    let branches = labels
        .iter()
        .map(|label| label.then.ty())
        .chain(otherwise.iter().map(|e| e.ty()));
    for branch in branches {
        if branch.is_unknown() {
            continue;
        }
        let Some(current) = result.take() else {
            result = Some(branch);
            continue;
        };
        match common_type(&current, &branch) {
            Some(common) => result = Some(common),
            None => {
                pass.report(IncompatibleTypesError {
                    span: get_node_span(expression.syntax()),
                    context: "CASE",
                    left: current,
                    right: branch,
                });
                result = Some(Ty::Unknown);
                break;
            }
        }
    }

    BoundExpression::Case(Arc::new(BoundCaseExpression {
        input,
        labels,
        otherwise,
        ty: result.unwrap_or(Ty::Unknown),
    }))
}

/// Binds a nested query under the current scope, so it can see outer columns.
fn bind_subquery(
    query: Option<quill_syntax_tree::ast::Query>,
    pass: &mut BindingPass,
) -> BoundQuery {
    match query {
        Some(query) => bind_query(&query, pass),
        None => BoundQuery::empty(),
    }
}

/// Checks that a subselect used as a value produces exactly one column.
fn single_column_type(query: &BoundQuery, node: &SyntaxNode, pass: &mut BindingPass) -> Ty {
    match query.output_columns() {
        [column] => column.ty().clone(),
        columns => {
            pass.report(ColumnCountMismatchError {
                span: get_node_span(node),
                context: ShapeContext::Subselect,
                expected: 1,
                found: columns.len(),
            });
            Ty::Unknown
        }
    }
}

fn bind_single_row_subselect(
    expression: &SingleRowSubselect,
    pass: &mut BindingPass,
) -> BoundExpression {
    let query = bind_subquery(expression.query(), pass);
    let ty = single_column_type(&query, expression.syntax(), pass);
    BoundExpression::SingleRowSubselect(Arc::new(BoundSingleRowSubselect { query, ty }))
}

/// Resolve `x op ALL (query)` and `x op ANY (query)`
fn bind_all_any_subselect(
    expression: &AllAnySubselect,
    pass: &mut BindingPass,
) -> BoundExpression {
    let span = get_node_span(expression.syntax());
    let left = bind_optional_expression(expression.left(), pass);
    let query = bind_subquery(expression.query(), pass);
    let column_type = single_column_type(&query, expression.syntax(), pass);

    let Some(operator) = expression.operator().as_ref().and_then(comparison_operator) else {
        return BoundExpression::error();
    };

    let left_type = left.ty();
    if binary_result_type(operator, &left_type, &column_type).is_none() {
        pass.report(OperatorTypeMismatchError {
            span,
            operator: operator.text(),
            operand_types: vec![left_type, column_type],
        });
    }

    BoundExpression::AllAnySubselect(Arc::new(BoundAllAnySubselect {
        left,
        operator,
        quantifier: expression.quantifier(),
        query,
    }))
}
