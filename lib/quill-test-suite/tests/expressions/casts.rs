use quill_test_suite::dsl::*;
use quill_test_suite::*;

#[test]
fn string_to_int_has_no_conversion() {
    Test::new(catalogs::orders(), cast(string("abc"), "int"))
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .at("CAST('abc' AS int)")
                .containing("cannot cast VARCHAR to INT"),
        )
        .expect(TypeOf::new("CAST('abc' AS int)").is(Ty::Unknown))
        .expect(ConversionOf::new("CAST('abc' AS int)", Conversion::None));
}

#[test]
fn conversion_kinds() {
    Test::new(
        catalogs::sales(),
        select([
            cast(name("Id"), "BIGINT").alias("widened"),
            cast(name("Total"), "INT").alias("narrowed"),
            cast(name("CustomerId"), "INTEGER").alias("same"),
        ])
        .from(table("Orders")),
    )
    .expect(NoDiagnostics)
    .expect(ConversionOf::new("CAST(Id AS BIGINT)", Conversion::Implicit))
    .expect(ConversionOf::new("CAST(Total AS INT)", Conversion::Explicit))
    .expect(ConversionOf::new("CAST(CustomerId AS INTEGER)", Conversion::Identity))
    .expect(
        OutputColumns::new(["widened", "narrowed", "same"])
            .with_types([Ty::Int64, Ty::Int32, Ty::Int32]),
    );
}

#[test]
fn null_casts_to_anything() {
    Test::new(catalogs::orders(), cast(null(), "DATETIME"))
        .expect(NoDiagnostics)
        .expect(TypeOf::new("CAST(NULL AS DATETIME)").is(Ty::DateTime));
}

#[test]
fn host_type_name() {
    Test::new(
        catalogs::sales(),
        select([cast(name("Location"), "point")]).from(table("Customers")),
    )
    .expect(NoDiagnostics)
    .expect(ConversionOf::new("CAST(Location AS point)", Conversion::Identity))
    .expect(TypeOf::new("CAST(Location AS point)").is(Ty::Host(catalogs::point())));
}

#[test]
fn unknown_type_name() {
    Test::new(
        catalogs::sales(),
        select([cast(name("Id"), "Money2")]).from(table("Orders")),
    )
    .expect(HasDiagnosticCount(1))
    .expect(
        Reports::new(DiagnosticId::UnresolvedName)
            .at("Money2")
            .containing("type 'Money2' does not exist"),
    )
    .expect(TypeOf::new("CAST(Id AS Money2)").is(Ty::Unknown));
}
