//! Unary and binary operator resolution.

use std::sync::Arc;

use quill_symbols::{Conversion, Ty};
use quill_syntax_tree::ast::{BinaryExpression, UnaryExpression};
use quill_syntax_tree::{AstNode, SyntaxKind, SyntaxToken};

use crate::bound::{
    BinaryOperator, BoundBinaryExpression, BoundExpression, BoundUnaryExpression, UnaryOperator,
};
use crate::diagnostics::OperatorTypeMismatchError;
use crate::utils::get_node_span;

use super::expressions::bind_optional_expression;
use super::BindingPass;

/// The type both operands convert to implicitly, if any.
///
/// `right` is preferred when `left` widens into it, so `INT` and `BIGINT`
/// meet at `BIGINT`.
pub(crate) fn common_type(left: &Ty, right: &Ty) -> Option<Ty> {
    if Conversion::classify(left, right).is_implicit() {
        Some(right.clone())
    } else if Conversion::classify(right, left).is_implicit() {
        Some(left.clone())
    } else {
        None
    }
}

/// Arithmetic on narrow integers happens at `INT` width.
fn promote(ty: Ty) -> Ty {
    match ty {
        Ty::Int8 | Ty::Int16 | Ty::Char => Ty::Int32,
        other => other,
    }
}

fn unary_operator(token: &SyntaxToken) -> Option<UnaryOperator> {
    match token.kind() {
        SyntaxKind::Plus => Some(UnaryOperator::Identity),
        SyntaxKind::Minus => Some(UnaryOperator::Negate),
        SyntaxKind::Tilde => Some(UnaryOperator::Complement),
        SyntaxKind::NotKeyword => Some(UnaryOperator::LogicalNot),
        _ => None,
    }
}

fn binary_operator(token: &SyntaxToken, negated: bool) -> Option<BinaryOperator> {
    let operator = match token.kind() {
        SyntaxKind::Plus => BinaryOperator::Add,
        SyntaxKind::Minus => BinaryOperator::Subtract,
        SyntaxKind::Star => BinaryOperator::Multiply,
        SyntaxKind::Slash => BinaryOperator::Divide,
        SyntaxKind::Percent => BinaryOperator::Modulus,
        SyntaxKind::Ampersand => BinaryOperator::BitAnd,
        SyntaxKind::Bar => BinaryOperator::BitOr,
        SyntaxKind::Caret => BinaryOperator::BitXor,
        SyntaxKind::Equals => BinaryOperator::Equal,
        SyntaxKind::NotEquals => BinaryOperator::NotEqual,
        SyntaxKind::Less => BinaryOperator::Less,
        SyntaxKind::LessOrEqual => BinaryOperator::LessOrEqual,
        SyntaxKind::Greater => BinaryOperator::Greater,
        SyntaxKind::GreaterOrEqual => BinaryOperator::GreaterOrEqual,
        SyntaxKind::AndKeyword => BinaryOperator::LogicalAnd,
        SyntaxKind::OrKeyword => BinaryOperator::LogicalOr,
        SyntaxKind::LikeKeyword if negated => BinaryOperator::NotLike,
        SyntaxKind::LikeKeyword => BinaryOperator::Like,
        _ => return None,
    };
    Some(operator)
}

/// Maps a comparison token, as used by ALL/ANY subselects.
pub(crate) fn comparison_operator(token: &SyntaxToken) -> Option<BinaryOperator> {
    binary_operator(token, false).filter(|operator| operator.is_comparison())
}

/// The result type of a unary operator, or `None` if it does not apply.
pub(crate) fn unary_result_type(operator: UnaryOperator, operand: &Ty) -> Option<Ty> {
    if operand.is_unknown() {
        return Some(match operator {
            UnaryOperator::LogicalNot => Ty::Boolean,
            _ => Ty::Unknown,
        });
    }

    match operator {
        UnaryOperator::Identity | UnaryOperator::Negate => match operand {
            Ty::Null => Some(Ty::Null),
            Ty::TimeSpan if operator == UnaryOperator::Negate => Some(Ty::TimeSpan),
            ty if ty.is_numeric() => Some(promote(ty.clone())),
            _ => None,
        },
        UnaryOperator::Complement => match operand {
            Ty::Null => Some(Ty::Null),
            Ty::Boolean => Some(Ty::Boolean),
            ty if ty.is_integer() => Some(promote(ty.clone())),
            _ => None,
        },
        UnaryOperator::LogicalNot => Conversion::classify(operand, &Ty::Boolean)
            .is_implicit()
            .then_some(Ty::Boolean),
    }
}

/// The result type of a binary operator, or `None` if it does not apply.
pub(crate) fn binary_result_type(operator: BinaryOperator, left: &Ty, right: &Ty) -> Option<Ty> {
    use crate::bound::BinaryOperator::*;

    let yields_boolean = operator.is_comparison()
        || matches!(operator, LogicalAnd | LogicalOr | Like | NotLike);

    if left.is_unknown() || right.is_unknown() {
        return Some(if yields_boolean { Ty::Boolean } else { Ty::Unknown });
    }

    match operator {
        Add | Subtract => match (left, right) {
            (Ty::DateTime, Ty::DateTime) if operator == Subtract => Some(Ty::TimeSpan),
            (Ty::DateTime, Ty::TimeSpan) => Some(Ty::DateTime),
            (Ty::TimeSpan, Ty::DateTime) if operator == Add => Some(Ty::DateTime),
            (Ty::TimeSpan, Ty::TimeSpan) => Some(Ty::TimeSpan),
            _ => arithmetic(operator, left, right),
        },
        Multiply | Divide | Modulus => arithmetic(operator, left, right),
        BitAnd | BitOr | BitXor => match common_type(left, right)? {
            Ty::Null => Some(Ty::Null),
            Ty::Boolean => Some(Ty::Boolean),
            ty if ty.is_integer() => Some(promote(ty)),
            _ => None,
        },
        Equal | NotEqual | Less | LessOrEqual | Greater | GreaterOrEqual => {
            common_type(left, right).map(|_| Ty::Boolean)
        }
        LogicalAnd | LogicalOr => expect_both(left, right, &Ty::Boolean),
        Like | NotLike => expect_both(left, right, &Ty::String),
    }
}

fn arithmetic(operator: BinaryOperator, left: &Ty, right: &Ty) -> Option<Ty> {
    match common_type(left, right)? {
        Ty::Null => Some(Ty::Null),
        Ty::String if operator == BinaryOperator::Add => Some(Ty::String),
        ty if ty.is_numeric() => Some(promote(ty)),
        _ => None,
    }
}

fn expect_both(left: &Ty, right: &Ty, expected: &Ty) -> Option<Ty> {
    let accepts = |ty: &Ty| Conversion::classify(ty, expected).is_implicit();
    (accepts(left) && accepts(right)).then_some(Ty::Boolean)
}

/// Resolve a unary expression: `-x`, `~x`, `NOT x`
pub(crate) fn bind_unary_expression(
    expression: &UnaryExpression,
    pass: &mut BindingPass,
) -> BoundExpression {
    let span = get_node_span(expression.syntax());
    let operand = bind_optional_expression(expression.operand(), pass);

    let Some(operator) = expression.operator().as_ref().and_then(unary_operator) else {
        return BoundExpression::error();
    };

    let operand_type = operand.ty();
    let ty = match unary_result_type(operator, &operand_type) {
        Some(ty) => ty,
        None => {
            pass.report(OperatorTypeMismatchError {
                span,
                operator: unary_text(operator),
                operand_types: vec![operand_type],
            });
            Ty::Unknown
        }
    };

    BoundExpression::Unary(Arc::new(BoundUnaryExpression {
        operator,
        operand,
        ty,
    }))
}

fn unary_text(operator: UnaryOperator) -> &'static str {
    match operator {
        UnaryOperator::Identity => "+",
        UnaryOperator::Negate => "-",
        UnaryOperator::Complement => "~",
        UnaryOperator::LogicalNot => "NOT",
    }
}

/// Resolve a binary expression: `a + b`, `a = b`, `a AND b`, `a NOT LIKE b`
pub(crate) fn bind_binary_expression(
    expression: &BinaryExpression,
    pass: &mut BindingPass,
) -> BoundExpression {
    let span = get_node_span(expression.syntax());

    // Both sides are bound even if the operator is unusable
    let left = bind_optional_expression(expression.left(), pass);
    let right = bind_optional_expression(expression.right(), pass);

    let operator = expression
        .operator()
        .as_ref()
        .and_then(|token| binary_operator(token, expression.is_negated()));
    let Some(operator) = operator else {
        return BoundExpression::error();
    };

    let (left_type, right_type) = (left.ty(), right.ty());
    let ty = match binary_result_type(operator, &left_type, &right_type) {
        Some(ty) => ty,
        None => {
            pass.report(OperatorTypeMismatchError {
                span,
                operator: operator.text(),
                operand_types: vec![left_type, right_type],
            });
            Ty::Unknown
        }
    };

    BoundExpression::Binary(Arc::new(BoundBinaryExpression {
        left,
        operator,
        right,
        ty,
    }))
}
