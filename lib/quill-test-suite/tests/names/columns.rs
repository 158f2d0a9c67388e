use quill_test_suite::dsl::*;
use quill_test_suite::*;

mod qualified {
    use super::*;

    #[test]
    fn column_through_alias() {
        Test::new(
            catalogs::orders(),
            select([qualified("o", "Id")])
                .from(table("Orders").alias("o"))
                .where_(qualified("o", "Total").gt(int(100))),
        )
        .expect(NoDiagnostics)
        .expect(
            DeclaredSymbolOf::new("Orders o")
                .is(SymbolKind::TableInstance)
                .named("o")
                .with_columns(["Id", "Total"]),
        )
        .expect(
            SymbolOf::new("o.Id")
                .is(SymbolKind::TableColumnInstance)
                .named("Id")
                .has_type(Ty::Int32),
        )
        .expect(SymbolOf::new("o").is(SymbolKind::TableInstance).named("o"))
        .expect(TypeOf::new("100").is(Ty::Int32))
        .expect(TypeOf::new("o.Total > 100").is(Ty::Boolean));
    }

    #[test]
    fn table_name_is_the_instance_name_without_alias() {
        Test::new(
            catalogs::orders(),
            select([qualified("Orders", "Total")]).from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("Orders").is(SymbolKind::TableInstance).named("Orders"))
        .expect(SymbolOf::new("Orders.Total").has_type(Ty::Decimal));
    }

    #[test]
    fn unknown_qualifier() {
        Test::new(
            catalogs::orders(),
            select([qualified("x", "Id")]).from(table("Orders").alias("o")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("x")
                .containing("table or column 'x' does not exist"),
        )
        .expect(SymbolOf::new("x").is(SymbolKind::BadSymbol))
        .expect(SymbolOf::new("x.Id").is(SymbolKind::BadSymbol))
        .expect(TypeOf::new("x.Id").is(Ty::Unknown));
    }

    #[test]
    fn alias_hides_table_name() {
        Test::new(
            catalogs::orders(),
            select([qualified("Orders", "Id")]).from(table("Orders").alias("o")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("Orders"));
    }

    #[test]
    fn unknown_column_of_instance() {
        Test::new(
            catalogs::orders(),
            select([qualified("o", "Missing")]).from(table("Orders").alias("o")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("Missing")
                .containing("table 'o' has no column 'Missing'"),
        )
        .expect(SymbolOf::new("o").is(SymbolKind::TableInstance));
    }
}

mod unqualified {
    use super::*;

    #[test]
    fn column_of_only_instance() {
        Test::new(
            catalogs::orders(),
            select([name("Total")]).from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(
            SymbolOf::new("Total")
                .is(SymbolKind::TableColumnInstance)
                .has_type(Ty::Decimal),
        );
    }

    #[test]
    fn instance_name_as_value() {
        Test::new(
            catalogs::orders(),
            select([name("o")]).from(table("Orders").alias("o")),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("o").is(SymbolKind::TableInstance).named("o"));
    }

    #[test]
    fn unknown_column() {
        Test::new(
            catalogs::orders(),
            select([name("Nope")]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("Nope")
                .containing("column 'Nope' does not exist"),
        )
        .expect(TypeOf::new("Nope").is(Ty::Unknown));
    }

    #[test]
    fn column_in_two_instances_is_ambiguous() {
        Test::new(
            catalogs::sales(),
            select([name("Id")]).from(
                table("Orders")
                    .alias("o")
                    .join(table("Customers").alias("c"))
                    .on(qualified("o", "CustomerId").eq(qualified("c", "Id"))),
            ),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::AmbiguousReference)
                .at("Id")
                .containing("'Id' is ambiguous"),
        )
        .expect(SymbolOf::new("Id").is(SymbolKind::BadSymbol));
    }

    #[test]
    fn column_in_one_of_two_instances() {
        Test::new(
            catalogs::sales(),
            select([name("City"), name("Total")])
                .from(table("Orders"))
                .from(table("Customers")),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("City").has_type(Ty::String))
        .expect(SymbolOf::new("Total").has_type(Ty::Decimal));
    }
}

mod tables {
    use super::*;

    #[test]
    fn unknown_table_is_reported_once() {
        Test::new(
            catalogs::orders(),
            select([qualified("i", "Id"), qualified("i", "Total")])
                .from(table("Invoices").alias("i")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("Invoices")
                .containing("table 'Invoices' does not exist"),
        )
        .expect(DeclaredSymbolOf::new("Invoices i").is(SymbolKind::TableInstance).named("i"))
        .expect(SymbolOf::new("i.Id").is(SymbolKind::BadSymbol));
    }

    #[test]
    fn wildcard_over_unknown_table_is_empty() {
        Test::new(catalogs::orders(), select([star()]).from(table("Invoices")))
            .expect(HasDiagnosticCount(1))
            .expect(OutputColumns::new(Vec::<&str>::new()));
    }

    #[test]
    fn exact_match_wins_over_case_insensitive_match() {
        let data_context = std::sync::Arc::new(
            quill_symbols::DataContext::builder()
                .table(quill_symbols::SchemaTableSymbol::new(
                    "T",
                    [("Name", Ty::String), ("NAME", Ty::Int32)],
                ))
                .build(),
        );

        Test::new(data_context.clone(), select([name("NAME")]).from(table("T")))
            .expect(NoDiagnostics)
            .expect(SymbolOf::new("NAME").has_type(Ty::Int32));

        Test::new(data_context, select([name("name")]).from(table("T")))
            .expect(Reports::new(DiagnosticId::AmbiguousReference).at("name"));
    }
}
