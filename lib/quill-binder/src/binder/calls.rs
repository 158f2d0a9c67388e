//! Call resolution.
//!
//! This module handles function invocations, aggregate invocations (including
//! `COUNT(*)`), method invocations on values, and the overload selection they
//! share.

use std::sync::Arc;

use quill_symbols::{AggregateSignature, AggregateSymbol, Conversion, ParameterSymbol, Ty};
use quill_syntax_tree::ast::{
    ArgumentList, CountAllExpression, FunctionInvocationExpression, MethodInvocationExpression,
};
use quill_syntax_tree::AstNode;

use crate::bound::{
    BoundAggregateExpression, BoundExpression, BoundFunctionInvocationExpression,
    BoundMethodInvocationExpression,
};
use crate::diagnostics::{
    AmbiguousOverloadError, NameKind, NoMatchingOverloadError, UnresolvedMemberError,
    UnresolvedNameError,
};
use crate::symbols::Symbol;
use crate::utils::{get_node_span, get_token_span, identifier_text, select_by_name};

use super::expressions::{bind_expression, bind_optional_expression};
use super::BindingPass;

/// Outcome of choosing between overloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OverloadResolution<T> {
    Selected(T),
    /// Several applicable candidates, none better than all others.
    Ambiguous(Vec<T>),
    /// No candidate accepts the arguments.
    NoMatch,
}

/// Picks the best overload for `arguments`.
///
/// A candidate applies when it has one parameter per argument and every
/// argument converts to its parameter (explicit conversions count).
/// Candidates that need no explicit conversion beat those that need one.
/// Among the remaining, the selected candidate must be at least as good as
/// every other for each argument, and strictly better for at least one.
pub(crate) fn select_overload<T: Clone>(
    candidates: &[T],
    parameters: impl Fn(&T) -> Vec<Ty>,
    arguments: &[Ty],
) -> OverloadResolution<T> {
    let applicable: Vec<(&T, Vec<Conversion>)> = candidates
        .iter()
        .filter_map(|candidate| {
            let parameters = parameters(candidate);
            if parameters.len() != arguments.len() {
                return None;
            }
            let conversions: Vec<Conversion> = arguments
                .iter()
                .zip(&parameters)
                .map(|(argument, parameter)| Conversion::classify(argument, parameter))
                .collect();
            conversions
                .iter()
                .all(|conversion| conversion.exists())
                .then_some((candidate, conversions))
        })
        .collect();

    if applicable.is_empty() {
        return OverloadResolution::NoMatch;
    }

    let needs_explicit = |conversions: &[Conversion]| conversions.contains(&Conversion::Explicit);
    let applicable: Vec<(&T, Vec<Conversion>)> =
        if applicable.iter().any(|(_, conversions)| !needs_explicit(conversions)) {
            applicable
                .into_iter()
                .filter(|(_, conversions)| !needs_explicit(conversions))
                .collect()
        } else {
            applicable
        };

    let better = |a: &[Conversion], b: &[Conversion]| {
        a.iter().zip(b).all(|(x, y)| x <= y) && a.iter().zip(b).any(|(x, y)| x < y)
    };

    for (index, (candidate, conversions)) in applicable.iter().enumerate() {
        let beats_all = applicable
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .all(|(_, (_, others))| better(conversions, others));
        if beats_all {
            return OverloadResolution::Selected((*candidate).clone());
        }
    }

    OverloadResolution::Ambiguous(
        applicable
            .into_iter()
            .map(|(candidate, _)| candidate.clone())
            .collect(),
    )
}

fn parameter_types(parameters: &[Arc<ParameterSymbol>]) -> Vec<Ty> {
    parameters.iter().map(|p| p.ty().clone()).collect()
}

fn signature(name: &str, parameters: &[Arc<ParameterSymbol>]) -> String {
    let parameters: Vec<String> = parameters.iter().map(|p| p.ty().to_string()).collect();
    format!("{}({})", name, parameters.join(", "))
}

fn bind_arguments(list: Option<ArgumentList>, pass: &mut BindingPass) -> Vec<BoundExpression> {
    match list {
        Some(list) => list
            .arguments()
            .map(|argument| bind_expression(&argument, pass))
            .collect(),
        None => Vec::new(),
    }
}

/// Resolve `name(arguments)` to a function, or to an aggregate when no
/// function of that name exists.
pub(crate) fn bind_function_invocation(
    expression: &FunctionInvocationExpression,
    pass: &mut BindingPass,
) -> BoundExpression {
    let span = get_node_span(expression.syntax());
    let arguments = bind_arguments(expression.argument_list(), pass);

    let Some(name_token) = expression.name() else {
        return BoundExpression::error();
    };
    let name = identifier_text(&name_token);
    let argument_types: Vec<Ty> = arguments.iter().map(|a| a.ty()).collect();

    let functions = pass.context().lookup_functions(&name, pass.case_sensitive());
    if !functions.is_empty() {
        let resolution = select_overload(&functions, |f| parameter_types(f.parameters()), &argument_types);
        let (symbol, ty) = match resolution {
            OverloadResolution::Selected(function) => {
                let ty = function.return_type().clone();
                (Symbol::Function(function), ty)
            }
            OverloadResolution::Ambiguous(candidates) => {
                if !argument_types.iter().any(Ty::is_unknown) {
                    pass.report(AmbiguousOverloadError {
                        span,
                        name: name.clone(),
                        candidates: candidates
                            .iter()
                            .map(|f| signature(f.name(), f.parameters()))
                            .collect(),
                    });
                }
                (Symbol::bad(name), Ty::Unknown)
            }
            OverloadResolution::NoMatch => {
                pass.report(NoMatchingOverloadError {
                    span,
                    kind: NameKind::Function,
                    name: name.clone(),
                    argument_types,
                });
                (Symbol::bad(name), Ty::Unknown)
            }
        };

        return BoundExpression::FunctionInvocation(Arc::new(BoundFunctionInvocationExpression {
            symbol,
            arguments,
            ty,
        }));
    }

    if let Some(aggregate) = pass.context().lookup_aggregate(&name, pass.case_sensitive()) {
        return bind_aggregate(aggregate, arguments, span, pass);
    }

    tracing::trace!(%name, "function not found");
    pass.report(UnresolvedNameError {
        span: get_token_span(&name_token),
        name: name.clone(),
        kind: NameKind::Function,
    });

    BoundExpression::FunctionInvocation(Arc::new(BoundFunctionInvocationExpression {
        symbol: Symbol::bad(name),
        arguments,
        ty: Ty::Unknown,
    }))
}

/// An aggregate takes exactly one argument whose type it accepts.
fn bind_aggregate(
    aggregate: Arc<AggregateSymbol>,
    arguments: Vec<BoundExpression>,
    span: quill_span::Span,
    pass: &mut BindingPass,
) -> BoundExpression {
    let argument_types: Vec<Ty> = arguments.iter().map(|a| a.ty()).collect();

    let ty = match argument_types.as_slice() {
        [argument] => aggregate.return_type(argument),
        _ => None,
    };
    let ty = ty.unwrap_or_else(|| {
        pass.report(NoMatchingOverloadError {
            span,
            kind: NameKind::Aggregate,
            name: aggregate.name().to_string(),
            argument_types,
        });
        Ty::Unknown
    });

    BoundExpression::Aggregate(Arc::new(BoundAggregateExpression {
        symbol: Symbol::Aggregate(aggregate),
        argument: arguments.into_iter().next(),
        ty,
    }))
}

/// Resolve `COUNT(*)`. Only aggregates that accept any argument allow `*`.
pub(crate) fn bind_count_all(expression: &CountAllExpression, pass: &mut BindingPass) -> BoundExpression {
    let span = get_node_span(expression.syntax());
    let Some(name_token) = expression.name() else {
        return BoundExpression::error();
    };
    let name = identifier_text(&name_token);

    let Some(aggregate) = pass.context().lookup_aggregate(&name, pass.case_sensitive()) else {
        pass.report(UnresolvedNameError {
            span: get_token_span(&name_token),
            name: name.clone(),
            kind: NameKind::Aggregate,
        });
        return BoundExpression::Aggregate(Arc::new(BoundAggregateExpression {
            symbol: Symbol::bad(name),
            argument: None,
            ty: Ty::Unknown,
        }));
    };

    let ty = match aggregate.signature() {
        AggregateSignature::Any { return_type } => return_type.clone(),
        _ => {
            pass.report(NoMatchingOverloadError {
                span,
                kind: NameKind::Aggregate,
                name: aggregate.name().to_string(),
                argument_types: vec![Ty::Object],
            });
            Ty::Unknown
        }
    };

    BoundExpression::Aggregate(Arc::new(BoundAggregateExpression {
        symbol: Symbol::Aggregate(aggregate),
        argument: None,
        ty,
    }))
}

/// Resolve `target.name(arguments)` through the method provider of the
/// target's type.
pub(crate) fn bind_method_invocation(
    expression: &MethodInvocationExpression,
    pass: &mut BindingPass,
) -> BoundExpression {
    let span = get_node_span(expression.syntax());
    let target = bind_optional_expression(expression.target(), pass);
    let arguments = bind_arguments(expression.argument_list(), pass);

    let Some(name_token) = expression.name() else {
        return BoundExpression::error();
    };
    let name = identifier_text(&name_token);
    let target_type = target.ty();

    let symbol = if target_type.is_unknown() {
        Symbol::bad(name)
    } else {
        let (data_context, cache) = pass.members();
        let methods = cache.methods(data_context, &target_type);
        let candidates: Vec<_> = select_by_name(&methods, &name, pass.case_sensitive(), |m| m.name())
            .into_iter()
            .cloned()
            .collect();
        let argument_types: Vec<Ty> = arguments.iter().map(|a| a.ty()).collect();

        if candidates.is_empty() {
            pass.report(UnresolvedMemberError {
                span: get_token_span(&name_token),
                name: name.clone(),
                kind: NameKind::Method,
                ty: target_type,
            });
            Symbol::bad(name)
        } else {
            match select_overload(&candidates, |m| parameter_types(m.parameters()), &argument_types) {
                OverloadResolution::Selected(method) => Symbol::Method(method),
                OverloadResolution::Ambiguous(ambiguous) => {
                    if !argument_types.iter().any(Ty::is_unknown) {
                        pass.report(AmbiguousOverloadError {
                            span,
                            name: name.clone(),
                            candidates: ambiguous
                                .iter()
                                .map(|m| signature(m.name(), m.parameters()))
                                .collect(),
                        });
                    }
                    Symbol::bad(name)
                }
                OverloadResolution::NoMatch => {
                    pass.report(NoMatchingOverloadError {
                        span,
                        kind: NameKind::Method,
                        name: name.clone(),
                        argument_types,
                    });
                    Symbol::bad(name)
                }
            }
        }
    };

    BoundExpression::MethodInvocation(Arc::new(BoundMethodInvocationExpression {
        target,
        symbol,
        arguments,
    }))
}
