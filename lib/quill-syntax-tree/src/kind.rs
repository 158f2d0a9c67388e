/// Declares `SyntaxKind` together with the table used to map raw rowan kinds back.
macro_rules! syntax_kinds {
    ($($kind:ident),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($kind),*
        }

        impl SyntaxKind {
            const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind),*];

            /// Maps a raw kind back to a `SyntaxKind`, yielding `Error` for unknown values.
            pub fn from_raw(raw: u16) -> SyntaxKind {
                Self::ALL.get(raw as usize).copied().unwrap_or(SyntaxKind::Error)
            }
        }
    };
}

syntax_kinds! {
    // ===== Syntax Nodes (Non-terminals) =====
    CompilationUnit,

    // Queries
    SelectQuery,
    SelectClause,
    TopClause,
    ExpressionSelectColumn,
    WildcardSelectColumn,
    Alias,
    FromClause,
    WhereClause,
    GroupByClause,
    HavingClause,
    OrderedQuery,
    OrderByColumn,
    CombinedQuery,
    ParenthesizedQuery,
    CommonTableExpressionQuery,
    CommonTableExpression,
    ColumnNameList,

    // Table references
    NamedTableReference,
    DerivedTableReference,
    JoinedTableReference,
    JoinCondition,
    ParenthesizedTableReference,

    // Expressions
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
    ArgumentList,
    CastExpression,
    TypeReference,
    IsNullExpression,
    CaseExpression,
    CaseLabel,
    SingleRowSubselect,
    ExistsSubselect,
    AllAnySubselect,

    // ===== Tokens (Terminals) =====
    // Literals
    Identifier,
    NumericLiteral,
    StringLiteral,

    // Keywords
    AllKeyword,
    AndKeyword,
    AnyKeyword,
    AsKeyword,
    AscKeyword,
    ByKeyword,
    CaseKeyword,
    CastKeyword,
    CrossKeyword,
    DescKeyword,
    DistinctKeyword,
    ElseKeyword,
    EndKeyword,
    ExceptKeyword,
    ExistsKeyword,
    FalseKeyword,
    FromKeyword,
    FullKeyword,
    GroupKeyword,
    HavingKeyword,
    InnerKeyword,
    IntersectKeyword,
    IsKeyword,
    JoinKeyword,
    LeftKeyword,
    LikeKeyword,
    NotKeyword,
    NullKeyword,
    OnKeyword,
    OrKeyword,
    OrderKeyword,
    OuterKeyword,
    RightKeyword,
    SelectKeyword,
    SomeKeyword,
    ThenKeyword,
    TiesKeyword,
    TopKeyword,
    TrueKeyword,
    UnionKeyword,
    WhenKeyword,
    WhereKeyword,
    WithKeyword,

    // Punctuation
    LParen,
    RParen,
    Comma,
    Dot,
    At,

    // Operators
    Star,
    Plus,
    Minus,
    Slash,
    Percent,
    Ampersand,
    Bar,
    Caret,
    Tilde,
    Equals,
    NotEquals,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,

    // Trivia (whitespace and comments)
    Whitespace,
    LineComment,
    BlockComment,

    // Special
    Error,
}

impl SyntaxKind {
    /// Returns true for whitespace and comments.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment
        )
    }

    /// Returns true for reserved words.
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::AllKeyword && self <= SyntaxKind::WithKeyword
    }

    /// Returns the keyword kind for `text`, ignoring case.
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text.to_ascii_uppercase().as_str() {
            "ALL" => SyntaxKind::AllKeyword,
            "AND" => SyntaxKind::AndKeyword,
            "ANY" => SyntaxKind::AnyKeyword,
            "AS" => SyntaxKind::AsKeyword,
            "ASC" => SyntaxKind::AscKeyword,
            "BY" => SyntaxKind::ByKeyword,
            "CASE" => SyntaxKind::CaseKeyword,
            "CAST" => SyntaxKind::CastKeyword,
            "CROSS" => SyntaxKind::CrossKeyword,
            "DESC" => SyntaxKind::DescKeyword,
            "DISTINCT" => SyntaxKind::DistinctKeyword,
            "ELSE" => SyntaxKind::ElseKeyword,
            "END" => SyntaxKind::EndKeyword,
            "EXCEPT" => SyntaxKind::ExceptKeyword,
            "EXISTS" => SyntaxKind::ExistsKeyword,
            "FALSE" => SyntaxKind::FalseKeyword,
            "FROM" => SyntaxKind::FromKeyword,
            "FULL" => SyntaxKind::FullKeyword,
            "GROUP" => SyntaxKind::GroupKeyword,
            "HAVING" => SyntaxKind::HavingKeyword,
            "INNER" => SyntaxKind::InnerKeyword,
            "INTERSECT" => SyntaxKind::IntersectKeyword,
            "IS" => SyntaxKind::IsKeyword,
            "JOIN" => SyntaxKind::JoinKeyword,
            "LEFT" => SyntaxKind::LeftKeyword,
            "LIKE" => SyntaxKind::LikeKeyword,
            "NOT" => SyntaxKind::NotKeyword,
            "NULL" => SyntaxKind::NullKeyword,
            "ON" => SyntaxKind::OnKeyword,
            "OR" => SyntaxKind::OrKeyword,
            "ORDER" => SyntaxKind::OrderKeyword,
            "OUTER" => SyntaxKind::OuterKeyword,
            "RIGHT" => SyntaxKind::RightKeyword,
            "SELECT" => SyntaxKind::SelectKeyword,
            "SOME" => SyntaxKind::SomeKeyword,
            "THEN" => SyntaxKind::ThenKeyword,
            "TIES" => SyntaxKind::TiesKeyword,
            "TOP" => SyntaxKind::TopKeyword,
            "TRUE" => SyntaxKind::TrueKeyword,
            "UNION" => SyntaxKind::UnionKeyword,
            "WHEN" => SyntaxKind::WhenKeyword,
            "WHERE" => SyntaxKind::WhereKeyword,
            "WITH" => SyntaxKind::WithKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the fixed text of punctuation and operator tokens.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::LParen => "(",
            SyntaxKind::RParen => ")",
            SyntaxKind::Comma => ",",
            SyntaxKind::Dot => ".",
            SyntaxKind::At => "@",
            SyntaxKind::Star => "*",
            SyntaxKind::Plus => "+",
            SyntaxKind::Minus => "-",
            SyntaxKind::Slash => "/",
            SyntaxKind::Percent => "%",
            SyntaxKind::Ampersand => "&",
            SyntaxKind::Bar => "|",
            SyntaxKind::Caret => "^",
            SyntaxKind::Tilde => "~",
            SyntaxKind::Equals => "=",
            SyntaxKind::NotEquals => "<>",
            SyntaxKind::Less => "<",
            SyntaxKind::LessOrEqual => "<=",
            SyntaxKind::Greater => ">",
            SyntaxKind::GreaterOrEqual => ">=",
            _ => return None,
        };
        Some(text)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}
