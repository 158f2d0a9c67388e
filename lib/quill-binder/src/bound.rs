//! The bound tree: the typed, resolved counterpart of the syntax tree.
//!
//! Every node is immutable and reference counted, so a subtree can be shared
//! between its parent and the syntax-node map of a [`BindingResult`].
//!
//! [`BindingResult`]: crate::BindingResult

use std::sync::Arc;

use quill_symbols::{Conversion, Ty, Value};
use quill_syntax_tree::ast::{CombinedQueryOperator, JoinType, Quantifier};

use crate::symbols::{
    CommonTableExpressionSymbol, QueryColumnInstanceSymbol, Symbol, TableColumnInstanceSymbol,
    TableInstanceSymbol, ValueSlot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundNodeKind {
    NameExpression,
    UnaryExpression,
    BinaryExpression,
    LiteralExpression,
    VariableExpression,
    FunctionInvocationExpression,
    AggregateExpression,
    PropertyAccessExpression,
    MethodInvocationExpression,
    CastExpression,
    IsNullExpression,
    CaseLabel,
    CaseExpression,
    SingleRowSubselect,
    ExistsSubselect,
    AllAnySubselect,
    ValueSlotExpression,
    NamedTableReference,
    DerivedTableReference,
    JoinedTableReference,
    SelectColumn,
    WildcardSelectColumn,
    SelectQuery,
    CombinedQuery,
    CommonTableExpression,
    CommonTableExpressionQuery,
    OrderedQuery,
    TopQuery,
}

/// Any bound node.
#[derive(Debug, Clone)]
pub enum BoundNode {
    Expression(BoundExpression),
    Query(BoundQuery),
    TableReference(BoundTableReference),
    SelectColumn(Arc<BoundSelectColumn>),
    WildcardSelectColumn(Arc<BoundWildcardSelectColumn>),
    CaseLabel(Arc<BoundCaseLabel>),
    CommonTableExpression(Arc<BoundCommonTableExpression>),
}

impl BoundNode {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundNode::Expression(expression) => expression.kind(),
            BoundNode::Query(query) => query.kind(),
            BoundNode::TableReference(reference) => reference.kind(),
            BoundNode::SelectColumn(_) => BoundNodeKind::SelectColumn,
            BoundNode::WildcardSelectColumn(_) => BoundNodeKind::WildcardSelectColumn,
            BoundNode::CaseLabel(_) => BoundNodeKind::CaseLabel,
            BoundNode::CommonTableExpression(_) => BoundNodeKind::CommonTableExpression,
        }
    }

    pub fn as_expression(&self) -> Option<&BoundExpression> {
        match self {
            BoundNode::Expression(expression) => Some(expression),
            _ => None,
        }
    }

    pub fn as_query(&self) -> Option<&BoundQuery> {
        match self {
            BoundNode::Query(query) => Some(query),
            _ => None,
        }
    }

    pub fn as_table_reference(&self) -> Option<&BoundTableReference> {
        match self {
            BoundNode::TableReference(reference) => Some(reference),
            _ => None,
        }
    }
}

// ===== Expressions =====

#[derive(Debug, Clone)]
pub enum BoundExpression {
    Name(Arc<BoundNameExpression>),
    Unary(Arc<BoundUnaryExpression>),
    Binary(Arc<BoundBinaryExpression>),
    Literal(Arc<BoundLiteralExpression>),
    Variable(Arc<BoundVariableExpression>),
    FunctionInvocation(Arc<BoundFunctionInvocationExpression>),
    Aggregate(Arc<BoundAggregateExpression>),
    PropertyAccess(Arc<BoundPropertyAccessExpression>),
    MethodInvocation(Arc<BoundMethodInvocationExpression>),
    Cast(Arc<BoundCastExpression>),
    IsNull(Arc<BoundIsNullExpression>),
    Case(Arc<BoundCaseExpression>),
    SingleRowSubselect(Arc<BoundSingleRowSubselect>),
    ExistsSubselect(Arc<BoundExistsSubselect>),
    AllAnySubselect(Arc<BoundAllAnySubselect>),
    ValueSlot(Arc<BoundValueSlotExpression>),
}

impl BoundExpression {
    /// A name expression bound to `symbol`, typed by the symbol.
    pub fn name(symbol: Symbol) -> Self {
        let ty = symbol.ty();
        BoundExpression::Name(Arc::new(BoundNameExpression { symbol, ty }))
    }

    /// Placeholder for an expression that could not be bound at all.
    pub fn error() -> Self {
        BoundExpression::name(Symbol::bad(""))
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundExpression::Name(_) => BoundNodeKind::NameExpression,
            BoundExpression::Unary(_) => BoundNodeKind::UnaryExpression,
            BoundExpression::Binary(_) => BoundNodeKind::BinaryExpression,
            BoundExpression::Literal(_) => BoundNodeKind::LiteralExpression,
            BoundExpression::Variable(_) => BoundNodeKind::VariableExpression,
            BoundExpression::FunctionInvocation(_) => BoundNodeKind::FunctionInvocationExpression,
            BoundExpression::Aggregate(_) => BoundNodeKind::AggregateExpression,
            BoundExpression::PropertyAccess(_) => BoundNodeKind::PropertyAccessExpression,
            BoundExpression::MethodInvocation(_) => BoundNodeKind::MethodInvocationExpression,
            BoundExpression::Cast(_) => BoundNodeKind::CastExpression,
            BoundExpression::IsNull(_) => BoundNodeKind::IsNullExpression,
            BoundExpression::Case(_) => BoundNodeKind::CaseExpression,
            BoundExpression::SingleRowSubselect(_) => BoundNodeKind::SingleRowSubselect,
            BoundExpression::ExistsSubselect(_) => BoundNodeKind::ExistsSubselect,
            BoundExpression::AllAnySubselect(_) => BoundNodeKind::AllAnySubselect,
            BoundExpression::ValueSlot(_) => BoundNodeKind::ValueSlotExpression,
        }
    }

    /// The static type of the expression. Never absent; failures are `UNKNOWN`.
    pub fn ty(&self) -> Ty {
        match self {
            BoundExpression::Name(e) => e.ty.clone(),
            BoundExpression::Unary(e) => e.ty.clone(),
            BoundExpression::Binary(e) => e.ty.clone(),
            BoundExpression::Literal(e) => e.ty.clone(),
            BoundExpression::Variable(e) => e.symbol.ty(),
            BoundExpression::FunctionInvocation(e) => e.ty.clone(),
            BoundExpression::Aggregate(e) => e.ty.clone(),
            BoundExpression::PropertyAccess(e) => e.symbol.ty(),
            BoundExpression::MethodInvocation(e) => e.symbol.ty(),
            BoundExpression::Cast(e) => e.ty.clone(),
            BoundExpression::IsNull(_) => Ty::Boolean,
            BoundExpression::Case(e) => e.ty.clone(),
            BoundExpression::SingleRowSubselect(e) => e.ty.clone(),
            BoundExpression::ExistsSubselect(_) => Ty::Boolean,
            BoundExpression::AllAnySubselect(_) => Ty::Boolean,
            BoundExpression::ValueSlot(e) => e.slot.ty().clone(),
        }
    }

    /// The symbol the expression refers to, for the kinds that refer to one.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            BoundExpression::Name(e) => Some(e.symbol.clone()),
            BoundExpression::Variable(e) => Some(e.symbol.clone()),
            BoundExpression::FunctionInvocation(e) => Some(e.symbol.clone()),
            BoundExpression::Aggregate(e) => Some(e.symbol.clone()),
            BoundExpression::PropertyAccess(e) => Some(e.symbol.clone()),
            BoundExpression::MethodInvocation(e) => Some(e.symbol.clone()),
            _ => None,
        }
    }
}

/// A reference to a column, table instance or query column by name.
#[derive(Debug)]
pub struct BoundNameExpression {
    pub symbol: Symbol,
    pub ty: Ty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Identity,
    Negate,
    Complement,
    LogicalNot,
}

#[derive(Debug)]
pub struct BoundUnaryExpression {
    pub operator: UnaryOperator,
    pub operand: BoundExpression,
    pub ty: Ty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    BitAnd,
    BitOr,
    BitXor,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    LogicalAnd,
    LogicalOr,
    Like,
    NotLike,
}

impl BinaryOperator {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::Less
                | BinaryOperator::LessOrEqual
                | BinaryOperator::Greater
                | BinaryOperator::GreaterOrEqual
        )
    }

    pub fn text(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulus => "%",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::Less => "<",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::LogicalAnd => "AND",
            BinaryOperator::LogicalOr => "OR",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::NotLike => "NOT LIKE",
        }
    }
}

#[derive(Debug)]
pub struct BoundBinaryExpression {
    pub left: BoundExpression,
    pub operator: BinaryOperator,
    pub right: BoundExpression,
    pub ty: Ty,
}

#[derive(Debug)]
pub struct BoundLiteralExpression {
    pub value: Value,
    pub ty: Ty,
}

#[derive(Debug)]
pub struct BoundVariableExpression {
    /// A variable, or a bad symbol when the name did not resolve.
    pub symbol: Symbol,
}

#[derive(Debug)]
pub struct BoundFunctionInvocationExpression {
    pub symbol: Symbol,
    pub arguments: Vec<BoundExpression>,
    pub ty: Ty,
}

#[derive(Debug)]
pub struct BoundAggregateExpression {
    pub symbol: Symbol,
    /// `None` for `COUNT(*)`.
    pub argument: Option<BoundExpression>,
    pub ty: Ty,
}

#[derive(Debug)]
pub struct BoundPropertyAccessExpression {
    pub target: BoundExpression,
    pub symbol: Symbol,
}

#[derive(Debug)]
pub struct BoundMethodInvocationExpression {
    pub target: BoundExpression,
    pub symbol: Symbol,
    pub arguments: Vec<BoundExpression>,
}

#[derive(Debug)]
pub struct BoundCastExpression {
    pub expression: BoundExpression,
    pub target_type: Ty,
    pub conversion: Conversion,
    /// The target type, or `UNKNOWN` when no conversion exists.
    pub ty: Ty,
}

#[derive(Debug)]
pub struct BoundIsNullExpression {
    pub expression: BoundExpression,
    pub negated: bool,
}

#[derive(Debug)]
pub struct BoundCaseLabel {
    pub when: BoundExpression,
    pub then: BoundExpression,
}

#[derive(Debug)]
pub struct BoundCaseExpression {
    pub input: Option<BoundExpression>,
    pub labels: Vec<Arc<BoundCaseLabel>>,
    pub otherwise: Option<BoundExpression>,
    pub ty: Ty,
}

#[derive(Debug)]
pub struct BoundSingleRowSubselect {
    pub query: BoundQuery,
    pub ty: Ty,
}

#[derive(Debug)]
pub struct BoundExistsSubselect {
    pub query: BoundQuery,
}

#[derive(Debug)]
pub struct BoundAllAnySubselect {
    pub left: BoundExpression,
    pub operator: BinaryOperator,
    pub quantifier: Quantifier,
    pub query: BoundQuery,
}

/// A direct reference to an output column, as produced by `ORDER BY 2`.
#[derive(Debug)]
pub struct BoundValueSlotExpression {
    pub slot: ValueSlot,
}

// ===== Table references =====

#[derive(Debug, Clone)]
pub enum BoundTableReference {
    Named(Arc<BoundNamedTableReference>),
    Derived(Arc<BoundDerivedTableReference>),
    Joined(Arc<BoundJoinedTableReference>),
}

impl BoundTableReference {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundTableReference::Named(_) => BoundNodeKind::NamedTableReference,
            BoundTableReference::Derived(_) => BoundNodeKind::DerivedTableReference,
            BoundTableReference::Joined(_) => BoundNodeKind::JoinedTableReference,
        }
    }

    /// The table instances the reference introduces, left to right.
    pub fn table_instances(&self) -> Vec<Arc<TableInstanceSymbol>> {
        match self {
            BoundTableReference::Named(named) => vec![named.instance.clone()],
            BoundTableReference::Derived(derived) => vec![derived.instance.clone()],
            BoundTableReference::Joined(joined) => {
                let mut instances = joined.left.table_instances();
                instances.extend(joined.right.table_instances());
                instances
            }
        }
    }
}

#[derive(Debug)]
pub struct BoundNamedTableReference {
    pub instance: Arc<TableInstanceSymbol>,
}

#[derive(Debug)]
pub struct BoundDerivedTableReference {
    pub instance: Arc<TableInstanceSymbol>,
    pub query: BoundQuery,
}

#[derive(Debug)]
pub struct BoundJoinedTableReference {
    pub left: BoundTableReference,
    pub right: BoundTableReference,
    pub join_type: JoinType,
    pub condition: Option<BoundExpression>,
}

// ===== Queries =====

#[derive(Debug, Clone)]
pub enum BoundQuery {
    Select(Arc<BoundSelectQuery>),
    Combined(Arc<BoundCombinedQuery>),
    Ordered(Arc<BoundOrderedQuery>),
    CommonTableExpression(Arc<BoundCommonTableExpressionQuery>),
    Top(Arc<BoundTopQuery>),
}

impl BoundQuery {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundQuery::Select(_) => BoundNodeKind::SelectQuery,
            BoundQuery::Combined(_) => BoundNodeKind::CombinedQuery,
            BoundQuery::Ordered(_) => BoundNodeKind::OrderedQuery,
            BoundQuery::CommonTableExpression(_) => BoundNodeKind::CommonTableExpressionQuery,
            BoundQuery::Top(_) => BoundNodeKind::TopQuery,
        }
    }

    /// A query with no columns, standing in for one that is missing from the tree.
    pub fn empty() -> Self {
        BoundQuery::Select(Arc::new(BoundSelectQuery {
            is_distinct: false,
            from: Vec::new(),
            predicate: None,
            group_by: Vec::new(),
            having: None,
            select_list: Vec::new(),
            output_columns: Vec::new(),
        }))
    }

    /// The columns the query produces, in order.
    pub fn output_columns(&self) -> &[Arc<QueryColumnInstanceSymbol>] {
        match self {
            BoundQuery::Select(select) => &select.output_columns,
            BoundQuery::Combined(combined) => &combined.output_columns,
            BoundQuery::Ordered(ordered) => ordered.input.output_columns(),
            BoundQuery::CommonTableExpression(query) => query.query.output_columns(),
            BoundQuery::Top(top) => top.input.output_columns(),
        }
    }
}

/// One entry of a select list.
#[derive(Debug, Clone)]
pub enum BoundSelectItem {
    Column(Arc<BoundSelectColumn>),
    Wildcard(Arc<BoundWildcardSelectColumn>),
}

#[derive(Debug)]
pub struct BoundSelectColumn {
    pub expression: BoundExpression,
    pub column: Arc<QueryColumnInstanceSymbol>,
}

/// `*` or `t.*`, expanded to the columns it stands for.
#[derive(Debug)]
pub struct BoundWildcardSelectColumn {
    /// The qualifying instance for `t.*`.
    pub table: Option<Arc<TableInstanceSymbol>>,
    pub columns: Vec<(Arc<TableColumnInstanceSymbol>, Arc<QueryColumnInstanceSymbol>)>,
}

#[derive(Debug)]
pub struct BoundSelectQuery {
    pub is_distinct: bool,
    pub from: Vec<BoundTableReference>,
    pub predicate: Option<BoundExpression>,
    pub group_by: Vec<BoundExpression>,
    pub having: Option<BoundExpression>,
    pub select_list: Vec<BoundSelectItem>,
    pub output_columns: Vec<Arc<QueryColumnInstanceSymbol>>,
}

#[derive(Debug)]
pub struct BoundTopQuery {
    pub input: BoundQuery,
    pub limit: u64,
    pub with_ties: bool,
}

#[derive(Debug)]
pub struct BoundCombinedQuery {
    pub left: BoundQuery,
    pub operator: CombinedQueryOperator,
    pub right: BoundQuery,
    pub output_columns: Vec<Arc<QueryColumnInstanceSymbol>>,
}

#[derive(Debug)]
pub struct BoundOrderByColumn {
    pub expression: BoundExpression,
    pub descending: bool,
}

#[derive(Debug)]
pub struct BoundOrderedQuery {
    pub input: BoundQuery,
    pub columns: Vec<BoundOrderByColumn>,
}

#[derive(Debug)]
pub struct BoundCommonTableExpression {
    pub symbol: Arc<CommonTableExpressionSymbol>,
}

#[derive(Debug)]
pub struct BoundCommonTableExpressionQuery {
    pub common_table_expressions: Vec<Arc<BoundCommonTableExpression>>,
    pub query: BoundQuery,
}
