use quill_test_suite::dsl::*;
use quill_test_suite::*;

mod arithmetic {
    use super::*;

    #[test]
    fn widens_to_common_type() {
        Test::new(
            catalogs::sales(),
            select([
                name("Id").add(int(1)).alias("n"),
                name("Total").mul(int(2)).alias("t"),
                name("Id").div(number("2.0")).alias("d"),
                name("Notes").add(string("!")).alias("s"),
            ])
            .from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(
            OutputColumns::new(["n", "t", "d", "s"])
                .with_types([Ty::Int32, Ty::Decimal, Ty::Float64, Ty::String]),
        );
    }

    #[test]
    fn date_arithmetic() {
        Test::new(
            catalogs::sales(),
            select([name("OrderDate").sub(call("NOW", []))]).from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("OrderDate - NOW()").is(Ty::TimeSpan));
    }

    #[test]
    fn string_minus_int_is_a_mismatch() {
        Test::new(
            catalogs::sales(),
            select([name("Notes").sub(int(1))]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .at("Notes - 1")
                .containing("operator '-' cannot be applied to operands of type (VARCHAR, INT)"),
        )
        .expect(TypeOf::new("Notes - 1").is(Ty::Unknown));
    }

    #[test]
    fn failures_do_not_cascade() {
        Test::new(
            catalogs::sales(),
            select([star()])
                .from(table("Orders"))
                .where_(name("Missing").add(int(1)).gt(int(2))),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("Missing"))
        .expect(TypeOf::new("Missing + 1").is(Ty::Unknown))
        .expect(TypeOf::new("Missing + 1 > 2").is(Ty::Boolean));
    }
}

mod comparison_and_logic {
    use super::*;

    #[test]
    fn comparisons_are_boolean() {
        Test::new(
            catalogs::sales(),
            select([star()]).from(table("Orders")).where_(
                name("Total")
                    .ge(int(10))
                    .and(name("Notes").not_like(string("%test%")))
                    .or(name("Notes").is_null()),
            ),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("Total >= 10").is(Ty::Boolean))
        .expect(TypeOf::new("Notes NOT LIKE '%test%'").is(Ty::Boolean))
        .expect(TypeOf::new("Notes IS NULL").is(Ty::Boolean));
    }

    #[test]
    fn comparison_needs_common_type() {
        Test::new(
            catalogs::sales(),
            select([star()])
                .from(table("Orders"))
                .where_(name("Notes").eq(name("Id"))),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::TypeMismatch).at("Notes = Id"))
        .expect(TypeOf::new("Notes = Id").is(Ty::Unknown));
    }

    #[test]
    fn like_needs_strings() {
        Test::new(
            catalogs::sales(),
            select([star()])
                .from(table("Orders"))
                .where_(name("Id").like(string("1%"))),
        )
        .expect(Reports::new(DiagnosticId::TypeMismatch).containing("operator 'LIKE'"));
    }

    #[test]
    fn where_must_be_boolean() {
        Test::new(
            catalogs::sales(),
            select([star()]).from(table("Orders")).where_(name("Id")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .containing("WHERE condition must be BOOLEAN, found INT"),
        );
    }
}

mod unary {
    use super::*;

    #[test]
    fn negate_and_complement() {
        Test::new(
            catalogs::sales(),
            select([
                neg(name("Total")).alias("n"),
                complement(name("Id")).alias("c"),
                name("Id").bit_and(int(3)).alias("b"),
            ])
            .from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(OutputColumns::new(["n", "c", "b"]).with_types([Ty::Decimal, Ty::Int32, Ty::Int32]));
    }

    #[test]
    fn not_requires_boolean() {
        Test::new(
            catalogs::sales(),
            select([star()]).from(table("Orders")).where_(not(name("Notes"))),
        )
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .at("NOT Notes")
                .containing("operator 'NOT' cannot be applied to operands of type (VARCHAR)"),
        );
    }

    #[test]
    fn complement_of_floating_point() {
        Test::new(catalogs::sales(), complement(number("1.5")))
            .expect(HasDiagnosticCount(1))
            .expect(Reports::new(DiagnosticId::TypeMismatch).at("~1.5"));
    }
}
