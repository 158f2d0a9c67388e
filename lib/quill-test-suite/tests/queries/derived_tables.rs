use quill_test_suite::dsl::*;
use quill_test_suite::*;

fn big_orders() -> Select {
    select([name("Id").into(), name("Total").alias("Big")]).from(table("Orders"))
}

#[test]
fn columns_come_from_inner_query() {
    Test::new(
        catalogs::sales(),
        select([qualified("d", "Big")]).from(derived(big_orders(), "d")),
    )
    .expect(NoDiagnostics)
    .expect(
        DeclaredSymbolOf::new("(SELECT Id, Total AS Big FROM Orders) AS d")
            .is(SymbolKind::TableInstance)
            .named("d")
            .with_columns(["Id", "Big"]),
    )
    .expect(
        SymbolOf::new("d.Big")
            .is(SymbolKind::TableColumnInstance)
            .has_type(Ty::Decimal),
    );
}

#[test]
fn wildcard_over_derived_table() {
    Test::new(catalogs::sales(), select([star()]).from(derived(big_orders(), "d")))
        .expect(NoDiagnostics)
        .expect(OutputColumns::new(["Id", "Big"]).with_types([Ty::Int32, Ty::Decimal]));
}

#[test]
fn inner_columns_are_hidden_behind_the_name() {
    Test::new(
        catalogs::sales(),
        select([qualified("d", "Total")]).from(derived(big_orders(), "d")),
    )
    .expect(HasDiagnosticCount(1))
    .expect(
        Reports::new(DiagnosticId::UnresolvedName)
            .at("Total")
            .containing("table 'd' has no column 'Total'"),
    );
}

#[test]
fn cannot_see_sibling_table_references() {
    Test::new(
        catalogs::sales(),
        select([star()])
            .from(table("Customers").alias("c"))
            .from(derived(select([qualified("c", "Id")]), "d")),
    )
    .expect(HasDiagnosticCount(1))
    .expect(Reports::new(DiagnosticId::UnresolvedName).at("c"));
}

#[test]
fn joined_with_schema_table() {
    Test::new(
        catalogs::sales(),
        select([qualified("c", "Name"), qualified("d", "Big")]).from(
            table("Customers")
                .alias("c")
                .join(derived(
                    select([name("CustomerId").into(), call("SUM", [name("Total")]).alias("Big")])
                        .from(table("Orders"))
                        .group_by([name("CustomerId")]),
                    "d",
                ))
                .on(qualified("d", "CustomerId").eq(qualified("c", "Id"))),
        ),
    )
    .expect(NoDiagnostics)
    .expect(OutputColumns::new(["Name", "Big"]).with_types([Ty::String, Ty::Decimal]));
}
