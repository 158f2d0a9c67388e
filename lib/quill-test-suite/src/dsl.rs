//! A small query DSL that lowers to syntax trees.
//!
//! Queries are written as Rust values and lowered to the same tree shape a
//! parser produces, with single spaces between tokens. The tree's text is
//! ordinary query text, so tests can refer to nodes by the text they cover:
//!
//! ```
//! use quill_test_suite::dsl::*;
//!
//! let query = select([qualified("o", "Id")])
//!     .from(table("Orders").alias("o"))
//!     .where_(qualified("o", "Total").gt(int(100)));
//!
//! assert_eq!(
//!     Query::from(query).to_syntax_tree().text(),
//!     "SELECT o.Id FROM Orders o WHERE o.Total > 100"
//! );
//! ```

use quill_syntax_tree::{GreenNodeBuilder, SyntaxKind, SyntaxTree};

use SyntaxKind::*;

// ===== Lowering =====

/// An intermediate tree of nodes and tokens, before spacing is decided.
#[derive(Debug, Clone)]
enum Element {
    Node(SyntaxKind, Vec<Element>),
    Token(SyntaxKind, String),
}

fn node(kind: SyntaxKind, children: Vec<Element>) -> Element {
    Element::Node(kind, children)
}

fn tok(kind: SyntaxKind, text: impl Into<String>) -> Element {
    Element::Token(kind, text.into())
}

fn keyword(kind: SyntaxKind) -> Element {
    let text = format!("{kind:?}")
        .trim_end_matches("Keyword")
        .to_ascii_uppercase();
    tok(kind, text)
}

fn punct(kind: SyntaxKind) -> Element {
    tok(kind, kind.punctuation_text().unwrap_or_default())
}

fn ident(name: &str) -> Element {
    tok(Identifier, name)
}

impl Element {
    fn first_token(&self) -> Option<SyntaxKind> {
        match self {
            Element::Token(kind, _) => Some(*kind),
            Element::Node(_, children) => children.iter().find_map(Element::first_token),
        }
    }
}

/// Whether a space separates two adjacent tokens.
fn needs_space(previous: Option<SyntaxKind>, next: SyntaxKind) -> bool {
    let Some(previous) = previous else {
        return false;
    };
    if matches!(previous, Whitespace | LParen | Dot | At) {
        return false;
    }
    if matches!(next, RParen | Comma | Dot) {
        return false;
    }
    !(next == LParen && matches!(previous, Identifier | CastKeyword))
}

fn write(element: &Element, builder: &mut GreenNodeBuilder, previous: &mut Option<SyntaxKind>) {
    // The separating space goes before a node starts, so nodes never begin
    // or end with trivia
    if let Some(first) = element.first_token() {
        if needs_space(*previous, first) {
            builder.token(Whitespace.into(), " ");
            *previous = Some(Whitespace);
        }
    }

    match element {
        Element::Token(kind, text) => {
            builder.token((*kind).into(), text);
            *previous = Some(*kind);
        }
        Element::Node(kind, children) => {
            builder.start_node((*kind).into());
            for child in children {
                write(child, builder, previous);
                // `-x` and `~x` keep the operator attached
                if *kind == UnaryExpression && matches!(child, Element::Token(Minus | Tilde, _)) {
                    *previous = None;
                }
            }
            builder.finish_node();
        }
    }
}

fn to_syntax_tree(element: &Element) -> SyntaxTree {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(CompilationUnit.into());
    write(element, &mut builder, &mut None);
    builder.finish_node();
    SyntaxTree::new(builder.finish())
}

fn comma_separated(items: impl IntoIterator<Item = Element>) -> Vec<Element> {
    let mut elements = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            elements.push(punct(Comma));
        }
        elements.push(item);
    }
    elements
}

/// Anything that can stand in for a parsed query.
pub trait IntoSyntaxTree {
    fn into_syntax_tree(self) -> SyntaxTree;
}

impl IntoSyntaxTree for SyntaxTree {
    fn into_syntax_tree(self) -> SyntaxTree {
        self
    }
}

impl IntoSyntaxTree for Query {
    fn into_syntax_tree(self) -> SyntaxTree {
        self.to_syntax_tree()
    }
}

impl IntoSyntaxTree for Select {
    fn into_syntax_tree(self) -> SyntaxTree {
        Query::from(self).to_syntax_tree()
    }
}

impl IntoSyntaxTree for Expr {
    fn into_syntax_tree(self) -> SyntaxTree {
        self.to_syntax_tree()
    }
}

impl IntoSyntaxTree for Case {
    fn into_syntax_tree(self) -> SyntaxTree {
        Expr::from(self).to_syntax_tree()
    }
}

// ===== Expressions =====

#[derive(Debug, Clone)]
pub struct Expr(Element);

impl Expr {
    fn binary(self, operator: Vec<Element>, right: impl Into<Expr>) -> Expr {
        let mut children = vec![self.0];
        children.extend(operator);
        children.push(right.into().0);
        Expr(node(BinaryExpression, children))
    }

    pub fn add(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Plus)], right)
    }

    pub fn sub(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Minus)], right)
    }

    pub fn mul(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Star)], right)
    }

    pub fn div(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Slash)], right)
    }

    pub fn modulo(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Percent)], right)
    }

    pub fn bit_and(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Ampersand)], right)
    }

    pub fn bit_or(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Bar)], right)
    }

    pub fn bit_xor(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Caret)], right)
    }

    pub fn eq(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Equals)], right)
    }

    pub fn ne(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(NotEquals)], right)
    }

    pub fn lt(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Less)], right)
    }

    pub fn le(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(LessOrEqual)], right)
    }

    pub fn gt(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(Greater)], right)
    }

    pub fn ge(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![punct(GreaterOrEqual)], right)
    }

    pub fn and(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![keyword(AndKeyword)], right)
    }

    pub fn or(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![keyword(OrKeyword)], right)
    }

    pub fn like(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![keyword(LikeKeyword)], right)
    }

    pub fn not_like(self, right: impl Into<Expr>) -> Expr {
        self.binary(vec![keyword(NotKeyword), keyword(LikeKeyword)], right)
    }

    /// `self.name`
    pub fn dot(self, name: &str) -> Expr {
        Expr(node(
            PropertyAccessExpression,
            vec![self.0, punct(Dot), ident(name)],
        ))
    }

    /// `self.name(arguments)`
    pub fn method(self, name: &str, arguments: impl IntoIterator<Item = Expr>) -> Expr {
        Expr(node(
            MethodInvocationExpression,
            vec![self.0, punct(Dot), ident(name), argument_list(arguments)],
        ))
    }

    pub fn is_null(self) -> Expr {
        Expr(node(
            IsNullExpression,
            vec![self.0, keyword(IsKeyword), keyword(NullKeyword)],
        ))
    }

    pub fn is_not_null(self) -> Expr {
        Expr(node(
            IsNullExpression,
            vec![
                self.0,
                keyword(IsKeyword),
                keyword(NotKeyword),
                keyword(NullKeyword),
            ],
        ))
    }

    fn quantified(self, operator: Element, quantifier: SyntaxKind, query: Query) -> Expr {
        Expr(node(
            AllAnySubselect,
            vec![
                self.0,
                operator,
                keyword(quantifier),
                punct(LParen),
                query.0,
                punct(RParen),
            ],
        ))
    }

    /// `self = ALL (query)`
    pub fn eq_all(self, query: impl Into<Query>) -> Expr {
        self.quantified(punct(Equals), AllKeyword, query.into())
    }

    /// `self > ALL (query)`
    pub fn gt_all(self, query: impl Into<Query>) -> Expr {
        self.quantified(punct(Greater), AllKeyword, query.into())
    }

    /// `self = ANY (query)`
    pub fn eq_any(self, query: impl Into<Query>) -> Expr {
        self.quantified(punct(Equals), AnyKeyword, query.into())
    }

    /// `self AS alias`, as a select column.
    pub fn alias(self, alias: &str) -> Column {
        Column(node(
            ExpressionSelectColumn,
            vec![self.0, alias_node(alias)],
        ))
    }

    /// The query text this expression stands for.
    pub fn text(&self) -> String {
        self.to_syntax_tree().text()
    }

    pub fn to_syntax_tree(&self) -> SyntaxTree {
        to_syntax_tree(&self.0)
    }
}

fn argument_list(arguments: impl IntoIterator<Item = Expr>) -> Element {
    let mut children = vec![punct(LParen)];
    children.extend(comma_separated(arguments.into_iter().map(|a| a.0)));
    children.push(punct(RParen));
    node(ArgumentList, children)
}

fn alias_node(alias: &str) -> Element {
    node(Alias, vec![keyword(AsKeyword), ident(alias)])
}

/// A column, table instance or output column by name.
pub fn name(name: &str) -> Expr {
    Expr(node(NameExpression, vec![ident(name)]))
}

/// `table.column`
pub fn qualified(table: &str, column: &str) -> Expr {
    self::name(table).dot(column)
}

/// `@name`
pub fn var(name: &str) -> Expr {
    Expr(node(VariableExpression, vec![punct(At), ident(name)]))
}

pub fn int(value: i64) -> Expr {
    number(&value.to_string())
}

/// A numeric literal written exactly as `text`.
pub fn number(text: &str) -> Expr {
    Expr(node(LiteralExpression, vec![tok(NumericLiteral, text)]))
}

/// A string literal; quotes are added and embedded quotes doubled.
pub fn string(value: &str) -> Expr {
    let text = format!("'{}'", value.replace('\'', "''"));
    Expr(node(LiteralExpression, vec![tok(StringLiteral, text)]))
}

pub fn boolean(value: bool) -> Expr {
    let kind = if value { TrueKeyword } else { FalseKeyword };
    Expr(node(LiteralExpression, vec![keyword(kind)]))
}

pub fn null() -> Expr {
    Expr(node(LiteralExpression, vec![keyword(NullKeyword)]))
}

pub fn paren(expression: impl Into<Expr>) -> Expr {
    Expr(node(
        ParenthesizedExpression,
        vec![punct(LParen), expression.into().0, punct(RParen)],
    ))
}

pub fn neg(operand: impl Into<Expr>) -> Expr {
    Expr(node(UnaryExpression, vec![punct(Minus), operand.into().0]))
}

pub fn complement(operand: impl Into<Expr>) -> Expr {
    Expr(node(UnaryExpression, vec![punct(Tilde), operand.into().0]))
}

pub fn not(operand: impl Into<Expr>) -> Expr {
    Expr(node(UnaryExpression, vec![keyword(NotKeyword), operand.into().0]))
}

/// `name(arguments)`
pub fn call(name: &str, arguments: impl IntoIterator<Item = Expr>) -> Expr {
    Expr(node(
        FunctionInvocationExpression,
        vec![ident(name), argument_list(arguments)],
    ))
}

/// `COUNT(*)`
pub fn count_all() -> Expr {
    Expr(node(
        CountAllExpression,
        vec![
            ident("COUNT"),
            punct(LParen),
            punct(Star),
            punct(RParen),
        ],
    ))
}

/// `CAST(expression AS type_name)`
pub fn cast(expression: impl Into<Expr>, type_name: &str) -> Expr {
    Expr(node(
        CastExpression,
        vec![
            keyword(CastKeyword),
            punct(LParen),
            expression.into().0,
            keyword(AsKeyword),
            node(TypeReference, vec![ident(type_name)]),
            punct(RParen),
        ],
    ))
}

/// `(query)` used as a value
pub fn subselect(query: impl Into<Query>) -> Expr {
    Expr(node(
        SingleRowSubselect,
        vec![punct(LParen), query.into().0, punct(RParen)],
    ))
}

/// `EXISTS (query)`
pub fn exists(query: impl Into<Query>) -> Expr {
    Expr(node(
        ExistsSubselect,
        vec![
            keyword(ExistsKeyword),
            punct(LParen),
            query.into().0,
            punct(RParen),
        ],
    ))
}

/// A CASE expression under construction.
#[derive(Debug, Clone)]
pub struct Case {
    input: Option<Expr>,
    labels: Vec<(Expr, Expr)>,
    otherwise: Option<Expr>,
}

/// `CASE WHEN condition THEN result ... END`
pub fn case_when(labels: impl IntoIterator<Item = (Expr, Expr)>) -> Case {
    Case {
        input: None,
        labels: labels.into_iter().collect(),
        otherwise: None,
    }
}

/// `CASE input WHEN value THEN result ... END`
pub fn case(input: impl Into<Expr>, labels: impl IntoIterator<Item = (Expr, Expr)>) -> Case {
    Case {
        input: Some(input.into()),
        labels: labels.into_iter().collect(),
        otherwise: None,
    }
}

impl Case {
    /// `ELSE result`
    pub fn otherwise(mut self, result: impl Into<Expr>) -> Case {
        self.otherwise = Some(result.into());
        self
    }
}

impl From<Case> for Expr {
    fn from(case: Case) -> Expr {
        let mut children = vec![keyword(CaseKeyword)];
        if let Some(input) = case.input {
            children.push(input.0);
        }
        for (when, then) in case.labels {
            children.push(node(
                CaseLabel,
                vec![
                    keyword(WhenKeyword),
                    when.0,
                    keyword(ThenKeyword),
                    then.0,
                ],
            ));
        }
        if let Some(otherwise) = case.otherwise {
            children.push(keyword(ElseKeyword));
            children.push(otherwise.0);
        }
        children.push(keyword(EndKeyword));
        Expr(node(CaseExpression, children))
    }
}

// ===== Select columns =====

/// One entry of a select list.
#[derive(Debug, Clone)]
pub struct Column(Element);

impl From<Expr> for Column {
    fn from(expression: Expr) -> Column {
        Column(node(ExpressionSelectColumn, vec![expression.0]))
    }
}

impl From<Case> for Column {
    fn from(case: Case) -> Column {
        Expr::from(case).into()
    }
}

/// `*`
pub fn star() -> Column {
    Column(node(WildcardSelectColumn, vec![punct(Star)]))
}

/// `table.*`
pub fn star_of(table: &str) -> Column {
    Column(node(
        WildcardSelectColumn,
        vec![ident(table), punct(Dot), punct(Star)],
    ))
}

// ===== Table references =====

#[derive(Debug, Clone)]
pub struct Table(TableKind);

#[derive(Debug, Clone)]
enum TableKind {
    Named {
        name: String,
        alias: Option<String>,
    },
    Derived {
        query: Query,
        name: String,
    },
    Joined {
        left: Box<Table>,
        join: Vec<SyntaxKind>,
        right: Box<Table>,
        condition: Option<Expr>,
    },
    Parenthesized(Box<Table>),
}

/// `name`
pub fn table(name: &str) -> Table {
    Table(TableKind::Named {
        name: name.to_string(),
        alias: None,
    })
}

/// `(query) AS name`
pub fn derived(query: impl Into<Query>, name: &str) -> Table {
    Table(TableKind::Derived {
        query: query.into(),
        name: name.to_string(),
    })
}

/// `(table)`
pub fn paren_table(table: Table) -> Table {
    Table(TableKind::Parenthesized(Box::new(table)))
}

impl Table {
    /// `name alias`. Only named references take an alias.
    pub fn alias(self, alias: &str) -> Table {
        match self.0 {
            TableKind::Named { name, .. } => Table(TableKind::Named {
                name,
                alias: Some(alias.to_string()),
            }),
            other => Table(other),
        }
    }

    fn joined(self, join: Vec<SyntaxKind>, right: Table) -> Table {
        Table(TableKind::Joined {
            left: Box::new(self),
            join,
            right: Box::new(right),
            condition: None,
        })
    }

    /// `self INNER JOIN right`
    pub fn join(self, right: Table) -> Table {
        self.joined(vec![InnerKeyword, JoinKeyword], right)
    }

    /// `self LEFT OUTER JOIN right`
    pub fn left_join(self, right: Table) -> Table {
        self.joined(vec![LeftKeyword, OuterKeyword, JoinKeyword], right)
    }

    /// `self CROSS JOIN right`
    pub fn cross_join(self, right: Table) -> Table {
        self.joined(vec![CrossKeyword, JoinKeyword], right)
    }

    /// `ON condition`, for the join just built.
    pub fn on(self, condition: impl Into<Expr>) -> Table {
        match self.0 {
            TableKind::Joined {
                left, join, right, ..
            } => Table(TableKind::Joined {
                left,
                join,
                right,
                condition: Some(condition.into()),
            }),
            other => Table(other),
        }
    }

    fn lower(self) -> Element {
        match self.0 {
            TableKind::Named { name, alias } => {
                let mut children = vec![ident(&name)];
                if let Some(alias) = alias {
                    children.push(node(Alias, vec![ident(&alias)]));
                }
                node(NamedTableReference, children)
            }
            TableKind::Derived { query, name } => node(
                DerivedTableReference,
                vec![
                    punct(LParen),
                    query.0,
                    punct(RParen),
                    keyword(AsKeyword),
                    ident(&name),
                ],
            ),
            TableKind::Joined {
                left,
                join,
                right,
                condition,
            } => {
                let mut children = vec![left.lower()];
                children.extend(join.into_iter().map(keyword));
                children.push(right.lower());
                if let Some(condition) = condition {
                    children.push(node(
                        JoinCondition,
                        vec![keyword(OnKeyword), condition.0],
                    ));
                }
                node(JoinedTableReference, children)
            }
            TableKind::Parenthesized(inner) => node(
                ParenthesizedTableReference,
                vec![punct(LParen), inner.lower(), punct(RParen)],
            ),
        }
    }
}

// ===== Queries =====

/// A SELECT under construction.
#[derive(Debug, Clone)]
pub struct Select {
    distinct: bool,
    top: Option<(String, bool)>,
    columns: Vec<Column>,
    from: Vec<Table>,
    predicate: Option<Expr>,
    group_by: Vec<Expr>,
    having: Option<Expr>,
}

/// `SELECT columns`
pub fn select<C: Into<Column>>(columns: impl IntoIterator<Item = C>) -> Select {
    Select {
        distinct: false,
        top: None,
        columns: columns.into_iter().map(Into::into).collect(),
        from: Vec::new(),
        predicate: None,
        group_by: Vec::new(),
        having: None,
    }
}

impl Select {
    /// Appends one more select column.
    pub fn column(mut self, column: impl Into<Column>) -> Select {
        self.columns.push(column.into());
        self
    }

    pub fn distinct(mut self) -> Select {
        self.distinct = true;
        self
    }

    /// `TOP n`
    pub fn top(self, limit: u64) -> Select {
        self.top_text(&limit.to_string())
    }

    /// `TOP text`, for row counts that are not valid numbers.
    pub fn top_text(mut self, text: &str) -> Select {
        self.top = Some((text.to_string(), false));
        self
    }

    /// `WITH TIES` for the TOP clause.
    pub fn with_ties(mut self) -> Select {
        if let Some((_, ties)) = &mut self.top {
            *ties = true;
        }
        self
    }

    /// Adds a table reference to the FROM clause.
    pub fn from(mut self, table: Table) -> Select {
        self.from.push(table);
        self
    }

    pub fn where_(mut self, predicate: impl Into<Expr>) -> Select {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn group_by(mut self, expressions: impl IntoIterator<Item = Expr>) -> Select {
        self.group_by = expressions.into_iter().collect();
        self
    }

    pub fn having(mut self, predicate: impl Into<Expr>) -> Select {
        self.having = Some(predicate.into());
        self
    }

    pub fn union(self, right: impl Into<Query>) -> Query {
        Query::from(self).union(right)
    }

    pub fn union_all(self, right: impl Into<Query>) -> Query {
        Query::from(self).union_all(right)
    }

    pub fn intersect(self, right: impl Into<Query>) -> Query {
        Query::from(self).intersect(right)
    }

    pub fn except(self, right: impl Into<Query>) -> Query {
        Query::from(self).except(right)
    }

    pub fn order_by<O: Into<OrderBy>>(self, columns: impl IntoIterator<Item = O>) -> Query {
        Query::from(self).order_by(columns)
    }

    pub fn text(self) -> String {
        Query::from(self).text()
    }

    pub fn to_syntax_tree(&self) -> SyntaxTree {
        Query::from(self.clone()).to_syntax_tree()
    }
}

impl From<Select> for Query {
    fn from(select: Select) -> Query {
        let mut clause = vec![keyword(SelectKeyword)];
        if select.distinct {
            clause.push(keyword(DistinctKeyword));
        }
        if let Some((limit, with_ties)) = select.top {
            let mut top = vec![keyword(TopKeyword), tok(NumericLiteral, limit)];
            if with_ties {
                top.push(keyword(WithKeyword));
                top.push(keyword(TiesKeyword));
            }
            clause.push(node(TopClause, top));
        }
        clause.extend(comma_separated(select.columns.into_iter().map(|c| c.0)));

        let mut children = vec![node(SelectClause, clause)];

        if !select.from.is_empty() {
            let mut from = vec![keyword(FromKeyword)];
            from.extend(comma_separated(select.from.into_iter().map(Table::lower)));
            children.push(node(FromClause, from));
        }
        if let Some(predicate) = select.predicate {
            children.push(node(WhereClause, vec![keyword(WhereKeyword), predicate.0]));
        }
        if !select.group_by.is_empty() {
            let mut group_by = vec![keyword(GroupKeyword), keyword(ByKeyword)];
            group_by.extend(comma_separated(select.group_by.into_iter().map(|e| e.0)));
            children.push(node(GroupByClause, group_by));
        }
        if let Some(having) = select.having {
            children.push(node(HavingClause, vec![keyword(HavingKeyword), having.0]));
        }

        Query(node(SelectQuery, children))
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone)]
pub struct OrderBy(Element);

impl From<Expr> for OrderBy {
    fn from(expression: Expr) -> OrderBy {
        OrderBy(node(OrderByColumn, vec![expression.0]))
    }
}

pub fn asc(expression: impl Into<Expr>) -> OrderBy {
    OrderBy(node(
        OrderByColumn,
        vec![expression.into().0, keyword(AscKeyword)],
    ))
}

pub fn desc(expression: impl Into<Expr>) -> OrderBy {
    OrderBy(node(
        OrderByColumn,
        vec![expression.into().0, keyword(DescKeyword)],
    ))
}

/// One `name [(columns)] AS (query)` definition of a WITH clause.
#[derive(Debug, Clone)]
pub struct Cte {
    name: String,
    columns: Option<Vec<String>>,
    query: Query,
}

pub fn cte(name: &str, query: impl Into<Query>) -> Cte {
    Cte {
        name: name.to_string(),
        columns: None,
        query: query.into(),
    }
}

impl Cte {
    /// Renames the output columns.
    pub fn columns<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Cte {
        self.columns = Some(names.into_iter().map(str::to_string).collect());
        self
    }

    fn lower(self) -> Element {
        let mut children = vec![ident(&self.name)];
        if let Some(columns) = self.columns {
            let mut list = vec![punct(LParen)];
            list.extend(comma_separated(columns.iter().map(|c| ident(c))));
            list.push(punct(RParen));
            children.push(node(ColumnNameList, list));
        }
        children.extend([
            keyword(AsKeyword),
            punct(LParen),
            self.query.0,
            punct(RParen),
        ]);
        node(CommonTableExpression, children)
    }
}

/// `WITH ctes query`
pub fn with(ctes: impl IntoIterator<Item = Cte>, query: impl Into<Query>) -> Query {
    let mut children = vec![keyword(WithKeyword)];
    children.extend(comma_separated(ctes.into_iter().map(Cte::lower)));
    children.push(query.into().0);
    Query(node(CommonTableExpressionQuery, children))
}

/// `(query)`
pub fn paren_query(query: impl Into<Query>) -> Query {
    Query(node(
        ParenthesizedQuery,
        vec![punct(LParen), query.into().0, punct(RParen)],
    ))
}

/// Any query.
#[derive(Debug, Clone)]
pub struct Query(Element);

impl Query {
    fn combined(self, operator: Vec<SyntaxKind>, right: impl Into<Query>) -> Query {
        let mut children = vec![self.0];
        children.extend(operator.into_iter().map(keyword));
        children.push(right.into().0);
        Query(node(CombinedQuery, children))
    }

    pub fn union(self, right: impl Into<Query>) -> Query {
        self.combined(vec![UnionKeyword], right)
    }

    pub fn union_all(self, right: impl Into<Query>) -> Query {
        self.combined(vec![UnionKeyword, AllKeyword], right)
    }

    pub fn intersect(self, right: impl Into<Query>) -> Query {
        self.combined(vec![IntersectKeyword], right)
    }

    pub fn except(self, right: impl Into<Query>) -> Query {
        self.combined(vec![ExceptKeyword], right)
    }

    /// `self ORDER BY columns`
    pub fn order_by<O: Into<OrderBy>>(self, columns: impl IntoIterator<Item = O>) -> Query {
        let mut children = vec![self.0, keyword(OrderKeyword), keyword(ByKeyword)];
        children.extend(comma_separated(
            columns.into_iter().map(|column| column.into().0),
        ));
        Query(node(OrderedQuery, children))
    }

    pub fn text(&self) -> String {
        self.to_syntax_tree().text()
    }

    pub fn to_syntax_tree(&self) -> SyntaxTree {
        to_syntax_tree(&self.0)
    }
}
