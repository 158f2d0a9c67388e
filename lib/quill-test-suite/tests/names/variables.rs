use quill_test_suite::dsl::*;
use quill_test_suite::*;

#[test]
fn variable_in_predicate() {
    Test::new(
        catalogs::sales(),
        select([star()])
            .from(table("Orders"))
            .where_(name("Id").gt(var("Threshold"))),
    )
    .expect(NoDiagnostics)
    .expect(
        SymbolOf::new("@Threshold")
            .is(SymbolKind::Variable)
            .named("Threshold")
            .has_type(Ty::Int32),
    )
    .expect(TypeOf::new("@Threshold").is(Ty::Int32));
}

#[test]
fn variable_without_from() {
    Test::new(catalogs::sales(), select([var("City").add(string("!"))]))
        .expect(NoDiagnostics)
        .expect(TypeOf::new("@City + '!'").is(Ty::String));
}

#[test]
fn unknown_variable() {
    Test::new(catalogs::sales(), select([var("Missing")]))
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("@Missing")
                .containing("variable '@Missing' does not exist"),
        )
        .expect(SymbolOf::new("@Missing").is(SymbolKind::BadSymbol))
        .expect(TypeOf::new("@Missing").is(Ty::Unknown));
}

#[test]
fn variable_is_not_a_column() {
    Test::new(
        catalogs::sales(),
        select([name("Threshold")]).from(table("Orders")),
    )
    .expect(Reports::new(DiagnosticId::UnresolvedName).at("Threshold"));
}

#[test]
fn variable_name_is_output_column_name() {
    Test::new(catalogs::sales(), select([var("Threshold")]))
        .expect(OutputColumns::new(["Threshold"]).with_types([Ty::Int32]));
}
