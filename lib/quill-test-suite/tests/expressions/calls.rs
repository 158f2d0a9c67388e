use quill_test_suite::dsl::*;
use quill_test_suite::*;

mod functions {
    use super::*;

    #[test]
    fn exact_overload_is_selected() {
        Test::new(
            catalogs::sales(),
            select([
                call("ABS", [name("Id")]).alias("i"),
                call("ABS", [name("Total")]).alias("t"),
                call("ABS", [number("1.5")]).alias("f"),
            ])
            .from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(
            SymbolOf::new("ABS(Id)")
                .is(SymbolKind::Function)
                .named("ABS")
                .has_type(Ty::Int32)
                .different_from("ABS(Total)", 0),
        )
        .expect(OutputColumns::new(["i", "t", "f"]).with_types([Ty::Int32, Ty::Decimal, Ty::Float64]));
    }

    #[test]
    fn explicit_conversion_still_applies() {
        Test::new(
            catalogs::sales(),
            select([call("ROUND", [name("Total"), int(2)])]).from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("ROUND(Total, 2)").is(Ty::Float64));
    }

    #[test]
    fn equally_good_overloads_are_ambiguous() {
        Test::new(
            catalogs::sales(),
            select([call("ABS", [cast(name("Id"), "SMALLINT")])]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::AmbiguousOverload)
                .at("ABS(CAST(Id AS SMALLINT))")
                .containing("call to 'ABS' is ambiguous"),
        )
        .expect(SymbolOf::new("ABS(CAST(Id AS SMALLINT))").is(SymbolKind::BadSymbol))
        .expect(TypeOf::new("ABS(CAST(Id AS SMALLINT))").is(Ty::Unknown));
    }

    fn pair_overloads() -> std::sync::Arc<quill_symbols::DataContext> {
        use quill_symbols::{DataContext, FunctionSymbol};

        std::sync::Arc::new(
            DataContext::builder()
                .function(FunctionSymbol::new(
                    "PAIR",
                    [("a", Ty::Int64), ("b", Ty::Int64)],
                    Ty::Int64,
                ))
                .function(FunctionSymbol::new(
                    "PAIR",
                    [("a", Ty::Int32), ("b", Ty::Int8)],
                    Ty::Int32,
                ))
                .build(),
        )
    }

    #[test]
    fn implicit_overload_beats_one_needing_explicit_conversion() {
        Test::new(pair_overloads(), call("PAIR", [int(1), int(2)]))
            .expect(NoDiagnostics)
            .expect(
                SymbolOf::new("PAIR(1, 2)")
                    .is(SymbolKind::Function)
                    .has_type(Ty::Int64),
            )
            .expect(TypeOf::new("PAIR(1, 2)").is(Ty::Int64));
    }

    #[test]
    fn overloads_all_needing_explicit_conversions_are_ambiguous() {
        Test::new(
            pair_overloads(),
            call("PAIR", [cast(int(1), "DECIMAL"), cast(int(2), "DECIMAL")]),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::AmbiguousOverload)
                .containing("call to 'PAIR' is ambiguous"),
        );
    }

    #[test]
    fn unknown_argument_suppresses_ambiguity() {
        Test::new(
            catalogs::sales(),
            select([call("ABS", [name("Missing")])]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("Missing"));
    }

    #[test]
    fn no_overload_accepts_argument() {
        Test::new(
            catalogs::sales(),
            select([call("LEN", [name("Id")])]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .at("LEN(Id)")
                .containing("no overload of function 'LEN' accepts arguments (INT)"),
        );
    }

    #[test]
    fn wrong_argument_count() {
        Test::new(catalogs::sales(), call("ROUND", [number("1.5")]))
            .expect(Reports::new(DiagnosticId::TypeMismatch).containing("function 'ROUND'"));
    }

    #[test]
    fn unknown_function() {
        Test::new(catalogs::sales(), call("FOO", [int(1)]))
            .expect(HasDiagnosticCount(1))
            .expect(
                Reports::new(DiagnosticId::UnresolvedName)
                    .at("FOO")
                    .containing("function 'FOO' does not exist"),
            )
            .expect(TypeOf::new("FOO(1)").is(Ty::Unknown));
    }
}

mod aggregates {
    use super::*;

    #[test]
    fn aggregate_result_types() {
        Test::new(
            catalogs::sales(),
            select([
                call("SUM", [name("Total")]).alias("s"),
                count_all().alias("n"),
                call("COUNT", [name("Notes")]).alias("c"),
                call("MAX", [name("OrderDate")]).alias("m"),
                call("AVG", [name("Id")]).alias("a"),
            ])
            .from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("COUNT(*)").is(SymbolKind::Aggregate).named("COUNT"))
        .expect(SymbolOf::new("SUM(Total)").is(SymbolKind::Aggregate))
        .expect(
            OutputColumns::new(["s", "n", "c", "m", "a"]).with_types([
                Ty::Decimal,
                Ty::Int32,
                Ty::Int32,
                Ty::DateTime,
                Ty::Int32,
            ]),
        );
    }

    #[test]
    fn sum_needs_numeric_argument() {
        Test::new(
            catalogs::sales(),
            select([call("SUM", [name("Notes")])]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .at("SUM(Notes)")
                .containing("no overload of aggregate 'SUM' accepts arguments (VARCHAR)"),
        );
    }

    #[test]
    fn count_all_needs_an_aggregate() {
        Test::new(
            catalogs::orders(),
            select([count_all()]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("COUNT")
                .containing("aggregate 'COUNT' does not exist"),
        );
    }

    #[test]
    fn group_by_and_having() {
        Test::new(
            catalogs::sales(),
            select([name("CustomerId").into(), call("SUM", [name("Total")]).alias("Spent")])
                .from(table("Orders"))
                .group_by([name("CustomerId")])
                .having(call("SUM", [name("Total")]).gt(int(1000))),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("SUM(Total) > 1000").is(Ty::Boolean))
        .expect(SymbolOf::new("CustomerId").nth(1).is(SymbolKind::TableColumnInstance));
    }

    #[test]
    fn having_must_be_boolean() {
        Test::new(
            catalogs::sales(),
            select([name("CustomerId")])
                .from(table("Orders"))
                .group_by([name("CustomerId")])
                .having(name("CustomerId")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::TypeMismatch).containing("HAVING condition must be BOOLEAN"));
    }
}
