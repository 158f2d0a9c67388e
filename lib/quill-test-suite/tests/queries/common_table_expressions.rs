use quill_test_suite::dsl::*;
use quill_test_suite::*;

fn big() -> Select {
    select([name("Id"), name("Total")])
        .from(table("Orders"))
        .where_(name("Total").gt(int(100)))
}

#[test]
fn main_query_reads_from_cte() {
    Test::new(
        catalogs::sales(),
        with([cte("Big", big())], select([name("Id")]).from(table("Big"))),
    )
    .expect(NoDiagnostics)
    .expect(
        DeclaredSymbolOf::new("Big AS (SELECT Id, Total FROM Orders WHERE Total > 100)")
            .is(SymbolKind::CommonTableExpression)
            .named("Big"),
    )
    .expect(
        DeclaredSymbolOf::new("Big")
            .is(SymbolKind::TableInstance)
            .with_columns(["Id", "Total"]),
    )
    .expect(
        SymbolOf::new("Id")
            .nth(1)
            .is(SymbolKind::TableColumnInstance)
            .different_from("Id", 0),
    )
    .expect(OutputColumns::new(["Id"]).with_types([Ty::Int32]));
}

#[test]
fn column_name_list_renames() {
    Test::new(
        catalogs::sales(),
        with(
            [cte("Big", big()).columns(["OrderId", "Amount"])],
            select([name("OrderId"), name("Amount")]).from(table("Big")),
        ),
    )
    .expect(NoDiagnostics)
    .expect(OutputColumns::new(["OrderId", "Amount"]).with_types([Ty::Int32, Ty::Decimal]));
}

#[test]
fn column_name_list_must_match() {
    Test::new(
        catalogs::sales(),
        with(
            [cte("Big", select([name("Id")]).from(table("Orders"))).columns(["A", "B"])],
            select([star()]).from(table("Big")),
        ),
    )
    .expect(HasDiagnosticCount(1))
    .expect(
        Reports::new(DiagnosticId::StructuralShapeMismatch)
            .at("(A, B)")
            .containing("2 column names were given but the query produces 1 columns"),
    )
    .expect(OutputColumns::new(["A"]));
}

#[test]
fn later_cte_sees_earlier_one() {
    Test::new(
        catalogs::sales(),
        with(
            [
                cte("A", big()),
                cte("B", select([star()]).from(table("A"))),
            ],
            select([star()]).from(table("B")),
        ),
    )
    .expect(NoDiagnostics)
    .expect(OutputColumns::new(["Id", "Total"]));
}

#[test]
fn earlier_cte_cannot_see_later_one() {
    Test::new(
        catalogs::sales(),
        with(
            [
                cte("A", select([star()]).from(table("B"))),
                cte("B", select([int(1).alias("x")])),
            ],
            select([star()]).from(table("A")),
        ),
    )
    .expect(HasDiagnosticCount(1))
    .expect(
        Reports::new(DiagnosticId::UnresolvedName)
            .at("B")
            .containing("table 'B' does not exist"),
    );
}

#[test]
fn cte_cannot_refer_to_itself() {
    Test::new(
        catalogs::sales(),
        with(
            [cte("A", select([star()]).from(table("A")))],
            select([star()]).from(table("A")),
        ),
    )
    .expect(HasDiagnosticCount(1))
    .expect(Reports::new(DiagnosticId::UnresolvedName).containing("table 'A' does not exist"));
}

#[test]
fn cte_shadows_schema_table() {
    Test::new(
        catalogs::sales(),
        with(
            [cte("Orders", select([int(1).alias("One")]))],
            select([name("One")]).from(table("Orders")),
        ),
    )
    .expect(NoDiagnostics)
    .expect(OutputColumns::new(["One"]).with_types([Ty::Int32]));
}
