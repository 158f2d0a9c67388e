use quill_compiler::CompilationOptions;
use quill_test_suite::dsl::*;
use quill_test_suite::*;

fn case_sensitive() -> CompilationOptions {
    CompilationOptions::new().with_case_sensitive(true)
}

mod ignoring_case {
    use super::*;

    #[test]
    fn table_column_and_qualifier() {
        Test::new(
            catalogs::orders(),
            select([qualified("O", "id")]).from(table("orders").alias("o")),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("O.id").is(SymbolKind::TableColumnInstance).named("Id"))
        .expect(DeclaredSymbolOf::new("orders o").with_columns(["Id", "Total"]));
    }

    #[test]
    fn variables_and_functions() {
        Test::new(
            catalogs::sales(),
            select([call("abs", [var("threshold")])]),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("abs(@threshold)").is(SymbolKind::Function).named("ABS"))
        .expect(SymbolOf::new("@threshold").named("Threshold"));
    }
}

mod respecting_case {
    use super::*;

    #[test]
    fn exact_names_resolve() {
        Test::new(
            catalogs::orders(),
            select([qualified("o", "Id")]).from(table("Orders").alias("o")),
        )
        .with_options(case_sensitive())
        .expect(NoDiagnostics);
    }

    #[test]
    fn column_case_must_match() {
        Test::new(
            catalogs::orders(),
            select([name("id")]).from(table("Orders")),
        )
        .with_options(case_sensitive())
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("id"));
    }

    #[test]
    fn table_case_must_match() {
        Test::new(catalogs::orders(), select([star()]).from(table("orders")))
            .with_options(case_sensitive())
            .expect(
                Reports::new(DiagnosticId::UnresolvedName)
                    .at("orders")
                    .containing("table 'orders'"),
            );
    }
}
