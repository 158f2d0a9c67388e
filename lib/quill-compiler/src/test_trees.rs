//! Hand-built syntax trees for unit tests.

use quill_syntax_tree::{GreenNodeBuilder, SyntaxKind, SyntaxTree};

use SyntaxKind::*;

pub(crate) struct TreeBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        let mut inner = GreenNodeBuilder::new();
        inner.start_node(CompilationUnit.into());
        TreeBuilder { inner }
    }

    pub(crate) fn node(&mut self, kind: SyntaxKind, children: impl FnOnce(&mut Self)) -> &mut Self {
        self.inner.start_node(kind.into());
        children(self);
        self.inner.finish_node();
        self
    }

    pub(crate) fn token(&mut self, kind: SyntaxKind, text: &str) -> &mut Self {
        self.inner.token(kind.into(), text);
        self
    }

    pub(crate) fn space(&mut self) -> &mut Self {
        self.token(Whitespace, " ")
    }

    pub(crate) fn name(&mut self, name: &str) -> &mut Self {
        self.node(NameExpression, |b| {
            b.token(Identifier, name);
        })
    }

    pub(crate) fn finish(mut self) -> SyntaxTree {
        self.inner.finish_node();
        SyntaxTree::new(self.inner.finish())
    }
}

/// `SELECT Id FROM Orders`
pub(crate) fn select_id_from_orders() -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    builder.node(SelectQuery, |b| {
        b.node(SelectClause, |b| {
            b.token(SelectKeyword, "SELECT").space();
            b.node(ExpressionSelectColumn, |b| {
                b.name("Id");
            });
        });
        b.space();
        b.node(FromClause, |b| {
            b.token(FromKeyword, "FROM").space();
            b.node(NamedTableReference, |b| {
                b.token(Identifier, "Orders");
            });
        });
    });
    builder.finish()
}

/// `SELECT o.Id, CAST(o.Id AS BIGINT) FROM Orders o`
///
/// Offsets: `o` at 7, `Id` at 9, `CAST` at 13, `Orders` at 39, alias `o` at 46.
pub(crate) fn select_qualified_from_orders() -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    builder.node(SelectQuery, |b| {
        b.node(SelectClause, |b| {
            b.token(SelectKeyword, "SELECT").space();
            b.node(ExpressionSelectColumn, |b| {
                qualified(b, "o", "Id");
            });
            b.token(Comma, ",").space();
            b.node(ExpressionSelectColumn, |b| {
                b.node(CastExpression, |b| {
                    b.token(CastKeyword, "CAST").token(LParen, "(");
                    qualified(b, "o", "Id");
                    b.space().token(AsKeyword, "AS").space();
                    b.node(TypeReference, |b| {
                        b.token(Identifier, "BIGINT");
                    });
                    b.token(RParen, ")");
                });
            });
        });
        b.space();
        b.node(FromClause, |b| {
            b.token(FromKeyword, "FROM").space();
            b.node(NamedTableReference, |b| {
                b.token(Identifier, "Orders").space();
                b.node(Alias, |b| {
                    b.token(Identifier, "o");
                });
            });
        });
    });
    builder.finish()
}

fn qualified(builder: &mut TreeBuilder, table: &str, column: &str) {
    builder.node(PropertyAccessExpression, |b| {
        b.name(table).token(Dot, ".").token(Identifier, column);
    });
}
