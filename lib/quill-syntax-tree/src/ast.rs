//! Typed views over untyped syntax nodes.
//!
//! Each view wraps a [`SyntaxNode`] of a specific kind and exposes its parts.
//! Accessors return `Option` because trees coming from a resilient parser may
//! be missing any piece.

use rowan::ast::AstNode;

use crate::{QuillLanguage, SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            type Language = QuillLanguage;

            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$name
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($variant)),*
        }

        impl AstNode for $name {
            type Language = QuillLanguage;

            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$variant)|*)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                match node.kind() {
                    $(SyntaxKind::$variant => Some($name::$variant($variant(node))),)*
                    _ => None,
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $($name::$variant(it) => it.syntax(),)*
                }
            }
        }

        $(
            impl From<$variant> for $name {
                fn from(node: $variant) -> Self {
                    $name::$variant(node)
                }
            }
        )*
    };
}

fn child<N: AstNode<Language = QuillLanguage>>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: AstNode<Language = QuillLanguage>>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

fn has_token(parent: &SyntaxNode, kind: SyntaxKind) -> bool {
    token(parent, kind).is_some()
}

/// First non-trivia token directly owned by `parent`.
fn first_token(parent: &SyntaxNode) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_trivia())
}

// ===== Root =====

ast_node!(
    /// The root of every tree: a single query or a standalone expression.
    CompilationUnit
);

impl CompilationUnit {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }

    pub fn expression(&self) -> Option<Expression> {
        child(&self.0)
    }
}

// ===== Queries =====

ast_enum!(
    Query {
        SelectQuery,
        CombinedQuery,
        OrderedQuery,
        CommonTableExpressionQuery,
        ParenthesizedQuery,
    }
);

ast_node!(SelectQuery);
ast_node!(SelectClause);
ast_node!(TopClause);
ast_node!(ExpressionSelectColumn);
ast_node!(WildcardSelectColumn);
ast_node!(Alias);
ast_node!(FromClause);
ast_node!(WhereClause);
ast_node!(GroupByClause);
ast_node!(HavingClause);
ast_node!(OrderedQuery);
ast_node!(OrderByColumn);
ast_node!(CombinedQuery);
ast_node!(ParenthesizedQuery);
ast_node!(CommonTableExpressionQuery);
ast_node!(CommonTableExpression);
ast_node!(ColumnNameList);

ast_enum!(SelectColumn { ExpressionSelectColumn, WildcardSelectColumn });

impl SelectQuery {
    pub fn select_clause(&self) -> Option<SelectClause> {
        child(&self.0)
    }

    pub fn from_clause(&self) -> Option<FromClause> {
        child(&self.0)
    }

    pub fn where_clause(&self) -> Option<WhereClause> {
        child(&self.0)
    }

    pub fn group_by_clause(&self) -> Option<GroupByClause> {
        child(&self.0)
    }

    pub fn having_clause(&self) -> Option<HavingClause> {
        child(&self.0)
    }
}

impl SelectClause {
    pub fn is_distinct(&self) -> bool {
        has_token(&self.0, SyntaxKind::DistinctKeyword)
    }

    pub fn top_clause(&self) -> Option<TopClause> {
        child(&self.0)
    }

    pub fn columns(&self) -> impl Iterator<Item = SelectColumn> {
        children(&self.0)
    }
}

impl TopClause {
    pub fn value(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::NumericLiteral)
    }

    pub fn with_ties(&self) -> bool {
        has_token(&self.0, SyntaxKind::TiesKeyword)
    }
}

impl ExpressionSelectColumn {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn alias(&self) -> Option<Alias> {
        child(&self.0)
    }
}

impl WildcardSelectColumn {
    /// The table qualifier in `t.*`, absent for a bare `*`.
    pub fn table_name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

impl Alias {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

impl FromClause {
    pub fn table_references(&self) -> impl Iterator<Item = TableReference> {
        children(&self.0)
    }
}

impl WhereClause {
    pub fn predicate(&self) -> Option<Expression> {
        child(&self.0)
    }
}

impl GroupByClause {
    pub fn expressions(&self) -> impl Iterator<Item = Expression> {
        children(&self.0)
    }
}

impl HavingClause {
    pub fn predicate(&self) -> Option<Expression> {
        child(&self.0)
    }
}

impl OrderedQuery {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }

    pub fn columns(&self) -> impl Iterator<Item = OrderByColumn> {
        children(&self.0)
    }
}

impl OrderByColumn {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn is_descending(&self) -> bool {
        has_token(&self.0, SyntaxKind::DescKeyword)
    }
}

/// Set operator of a combined query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinedQueryOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl CombinedQuery {
    pub fn left(&self) -> Option<Query> {
        child(&self.0)
    }

    pub fn right(&self) -> Option<Query> {
        children(&self.0).nth(1)
    }

    pub fn operator(&self) -> Option<CombinedQueryOperator> {
        if has_token(&self.0, SyntaxKind::UnionKeyword) {
            if has_token(&self.0, SyntaxKind::AllKeyword) {
                Some(CombinedQueryOperator::UnionAll)
            } else {
                Some(CombinedQueryOperator::Union)
            }
        } else if has_token(&self.0, SyntaxKind::IntersectKeyword) {
            Some(CombinedQueryOperator::Intersect)
        } else if has_token(&self.0, SyntaxKind::ExceptKeyword) {
            Some(CombinedQueryOperator::Except)
        } else {
            None
        }
    }
}

impl ParenthesizedQuery {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

impl CommonTableExpressionQuery {
    pub fn common_table_expressions(&self) -> impl Iterator<Item = CommonTableExpression> {
        children(&self.0)
    }

    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

impl CommonTableExpression {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }

    pub fn column_name_list(&self) -> Option<ColumnNameList> {
        child(&self.0)
    }

    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

impl ColumnNameList {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == SyntaxKind::Identifier)
    }
}

// ===== Table references =====

ast_enum!(
    TableReference {
        NamedTableReference,
        DerivedTableReference,
        JoinedTableReference,
        ParenthesizedTableReference,
    }
);

ast_node!(NamedTableReference);
ast_node!(DerivedTableReference);
ast_node!(JoinedTableReference);
ast_node!(JoinCondition);
ast_node!(ParenthesizedTableReference);

impl NamedTableReference {
    pub fn table_name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }

    pub fn alias(&self) -> Option<Alias> {
        child(&self.0)
    }
}

impl DerivedTableReference {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }

    /// The correlation name following the parenthesized query.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

/// How the two sides of a joined table reference are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinedTableReference {
    pub fn left(&self) -> Option<TableReference> {
        child(&self.0)
    }

    pub fn right(&self) -> Option<TableReference> {
        children(&self.0).nth(1)
    }

    pub fn join_type(&self) -> JoinType {
        if has_token(&self.0, SyntaxKind::CrossKeyword) {
            JoinType::Cross
        } else if has_token(&self.0, SyntaxKind::LeftKeyword) {
            JoinType::LeftOuter
        } else if has_token(&self.0, SyntaxKind::RightKeyword) {
            JoinType::RightOuter
        } else if has_token(&self.0, SyntaxKind::FullKeyword) {
            JoinType::FullOuter
        } else {
            JoinType::Inner
        }
    }

    pub fn condition(&self) -> Option<JoinCondition> {
        child(&self.0)
    }
}

impl JoinCondition {
    pub fn predicate(&self) -> Option<Expression> {
        child(&self.0)
    }
}

impl ParenthesizedTableReference {
    pub fn table_reference(&self) -> Option<TableReference> {
        child(&self.0)
    }
}

// ===== Expressions =====

ast_enum!(
    Expression {
        NameExpression,
        VariableExpression,
        LiteralExpression,
        UnaryExpression,
        BinaryExpression,
        ParenthesizedExpression,
        PropertyAccessExpression,
        MethodInvocationExpression,
        FunctionInvocationExpression,
        CountAllExpression,
        CastExpression,
        IsNullExpression,
        CaseExpression,
        SingleRowSubselect,
        ExistsSubselect,
        AllAnySubselect,
    }
);

ast_node!(NameExpression);
ast_node!(VariableExpression);
ast_node!(LiteralExpression);
ast_node!(UnaryExpression);
ast_node!(BinaryExpression);
ast_node!(ParenthesizedExpression);
ast_node!(PropertyAccessExpression);
ast_node!(MethodInvocationExpression);
ast_node!(FunctionInvocationExpression);
ast_node!(CountAllExpression);
ast_node!(ArgumentList);
ast_node!(CastExpression);
ast_node!(TypeReference);
ast_node!(IsNullExpression);
ast_node!(CaseExpression);
ast_node!(CaseLabel);
ast_node!(SingleRowSubselect);
ast_node!(ExistsSubselect);
ast_node!(AllAnySubselect);

impl NameExpression {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

impl VariableExpression {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

impl LiteralExpression {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0)
    }
}

impl UnaryExpression {
    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token(&self.0)
    }

    pub fn operand(&self) -> Option<Expression> {
        child(&self.0)
    }
}

impl BinaryExpression {
    pub fn left(&self) -> Option<Expression> {
        child(&self.0)
    }

    /// The operator token. For `NOT LIKE` this is the `LIKE` token.
    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia() && token.kind() != SyntaxKind::NotKeyword)
    }

    pub fn is_negated(&self) -> bool {
        has_token(&self.0, SyntaxKind::NotKeyword)
    }

    pub fn right(&self) -> Option<Expression> {
        children(&self.0).nth(1)
    }
}

impl ParenthesizedExpression {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0)
    }
}

impl PropertyAccessExpression {
    pub fn target(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

impl MethodInvocationExpression {
    pub fn target(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        child(&self.0)
    }
}

impl FunctionInvocationExpression {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        child(&self.0)
    }
}

impl CountAllExpression {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

impl ArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = Expression> {
        children(&self.0)
    }
}

impl CastExpression {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn type_reference(&self) -> Option<TypeReference> {
        child(&self.0)
    }
}

impl TypeReference {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }
}

impl IsNullExpression {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn is_negated(&self) -> bool {
        has_token(&self.0, SyntaxKind::NotKeyword)
    }
}

impl CaseExpression {
    /// The operand of a simple `CASE x WHEN ...`, absent for a searched CASE.
    pub fn input_expression(&self) -> Option<Expression> {
        self.0
            .children()
            .take_while(|node| node.kind() != SyntaxKind::CaseLabel)
            .find_map(Expression::cast)
    }

    pub fn labels(&self) -> impl Iterator<Item = CaseLabel> {
        children(&self.0)
    }

    pub fn else_expression(&self) -> Option<Expression> {
        let else_keyword = token(&self.0, SyntaxKind::ElseKeyword)?;
        let else_end = else_keyword.text_range().end();
        self.0
            .children()
            .filter(|node| node.text_range().start() >= else_end)
            .find_map(Expression::cast)
    }
}

impl CaseLabel {
    pub fn when_expression(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn then_expression(&self) -> Option<Expression> {
        children(&self.0).nth(1)
    }
}

impl SingleRowSubselect {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

impl ExistsSubselect {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

/// Quantifier of an ALL/ANY subselect. `SOME` is a synonym for `ANY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    All,
    Any,
}

impl AllAnySubselect {
    pub fn left(&self) -> Option<Expression> {
        child(&self.0)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token(&self.0)
    }

    pub fn quantifier(&self) -> Quantifier {
        if has_token(&self.0, SyntaxKind::AllKeyword) {
            Quantifier::All
        } else {
            Quantifier::Any
        }
    }

    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}
