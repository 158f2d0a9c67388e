use quill_test_suite::dsl::*;
use quill_test_suite::*;

#[test]
fn literal_types() {
    Test::new(
        catalogs::orders(),
        select([
            int(1).alias("a"),
            number("3000000000").alias("b"),
            number("99999999999999999999").alias("c"),
            number("1.5").alias("d"),
            string("x").alias("e"),
            boolean(true).alias("f"),
            null().alias("g"),
        ]),
    )
    .expect(NoDiagnostics)
    .expect(
        OutputColumns::new(["a", "b", "c", "d", "e", "f", "g"]).with_types([
            Ty::Int32,
            Ty::Int64,
            Ty::Decimal,
            Ty::Float64,
            Ty::String,
            Ty::Boolean,
            Ty::Null,
        ]),
    );
}

#[test]
fn exponent_is_floating_point() {
    Test::new(catalogs::orders(), number("1e3"))
        .expect(NoDiagnostics)
        .expect(TypeOf::new("1e3").is(Ty::Float64));
}

#[test]
fn escaped_quote_in_string() {
    Test::new(catalogs::orders(), select([string("it's")]))
        .expect(NoDiagnostics)
        .expect(TypeOf::new("'it''s'").is(Ty::String));
}

#[test]
fn unnamed_literal_column() {
    Test::new(catalogs::orders(), select([int(7)]))
        .expect(OutputColumns::new([""]).with_types([Ty::Int32]));
}
