use quill_test_suite::dsl::*;
use quill_test_suite::*;

#[test]
fn searched_case() {
    Test::new(
        catalogs::sales(),
        select([case_when([(name("Total").gt(int(100)), string("big"))]).otherwise(string("small"))])
            .from(table("Orders")),
    )
    .expect(NoDiagnostics)
    .expect(TypeOf::new("CASE WHEN Total > 100 THEN 'big' ELSE 'small' END").is(Ty::String));
}

#[test]
fn simple_case_widens_branches() {
    Test::new(
        catalogs::sales(),
        select([case(name("Id"), [(int(1), number("1.5")), (int(2), int(2))])]).from(table("Orders")),
    )
    .expect(NoDiagnostics)
    .expect(TypeOf::new("CASE Id WHEN 1 THEN 1.5 WHEN 2 THEN 2 END").is(Ty::Float64));
}

#[test]
fn null_branch_takes_other_type() {
    Test::new(
        catalogs::sales(),
        case_when([(boolean(true), null())]).otherwise(string("x")),
    )
    .expect(NoDiagnostics)
    .expect(TypeOf::new("CASE WHEN TRUE THEN NULL ELSE 'x' END").is(Ty::String));
}

#[test]
fn incompatible_branches() {
    Test::new(
        catalogs::sales(),
        case_when([(boolean(true), int(1))]).otherwise(string("x")),
    )
    .expect(HasDiagnosticCount(1))
    .expect(
        Reports::new(DiagnosticId::TypeMismatch)
            .at("CASE WHEN TRUE THEN 1 ELSE 'x' END")
            .containing("CASE has incompatible types INT and VARCHAR"),
    )
    .expect(TypeOf::new("CASE WHEN TRUE THEN 1 ELSE 'x' END").is(Ty::Unknown));
}

#[test]
fn when_must_be_boolean() {
    Test::new(
        catalogs::sales(),
        select([case_when([(name("Id"), int(1))])]).from(table("Orders")),
    )
    .expect(HasDiagnosticCount(1))
    .expect(
        Reports::new(DiagnosticId::TypeMismatch)
            .at("Id")
            .containing("WHEN condition must be BOOLEAN, found INT"),
    );
}

#[test]
fn simple_case_compares_input() {
    Test::new(
        catalogs::sales(),
        select([case(name("Notes"), [(int(1), int(1))])]).from(table("Orders")),
    )
    .expect(HasDiagnosticCount(1))
    .expect(
        Reports::new(DiagnosticId::TypeMismatch)
            .containing("CASE comparison has incompatible types VARCHAR and INT"),
    );
}

#[test]
fn unbound_branch_is_skipped() {
    Test::new(
        catalogs::sales(),
        select([case_when([(boolean(true), name("Missing"))]).otherwise(int(1))])
            .from(table("Orders")),
    )
    .expect(HasDiagnosticCount(1))
    .expect(TypeOf::new("CASE WHEN TRUE THEN Missing ELSE 1 END").is(Ty::Int32));
}
