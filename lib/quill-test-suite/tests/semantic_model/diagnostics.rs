use quill_compiler::CompilationOptions;
use quill_reporting::DiagnosticContext;
use quill_test_suite::dsl::*;
use quill_test_suite::*;

fn three_errors() -> Select {
    select([name("A"), name("B"), name("C")]).from(table("Orders"))
}

#[test]
fn renders_code_file_and_message() {
    let mut test = Test::new(
        catalogs::orders(),
        select([qualified("x", "Id")]).from(table("Orders").alias("o")),
    );

    let mut context = DiagnosticContext::new();
    let file_id = test.model().emit_diagnostics(&mut context, "report.sql");
    assert_eq!(file_id, 0);
    assert!(context.has_errors());
    assert_eq!(context.len(), 1);

    let rendered = context.render().expect("diagnostics render");
    assert!(rendered.contains("Q0001"), "{rendered}");
    assert!(rendered.contains("report.sql"), "{rendered}");
    assert!(rendered.contains("table or column 'x' does not exist"), "{rendered}");
}

#[test]
fn every_problem_is_reported() {
    Test::new(catalogs::orders(), three_errors())
        .expect(HasDiagnosticCount(3))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("A"))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("C"));
}

#[test]
fn diagnostics_are_in_binding_order() {
    let mut test = Test::new(catalogs::orders(), three_errors());
    let starts: Vec<usize> = test
        .model()
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.span.start)
        .collect();

    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn limit_caps_the_count() {
    Test::new(catalogs::orders(), three_errors())
        .with_options(CompilationOptions::new().with_max_diagnostics(2))
        .expect(HasDiagnosticCount(2))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("B"));
}

#[test]
fn diagnostics_have_codes() {
    assert_eq!(DiagnosticId::UnresolvedName.code(), "Q0001");
    assert_eq!(DiagnosticId::TypeMismatch.code(), "Q0002");
    assert_eq!(DiagnosticId::AmbiguousOverload.code(), "Q0003");
    assert_eq!(DiagnosticId::AmbiguousReference.code(), "Q0004");
    assert_eq!(DiagnosticId::StructuralShapeMismatch.code(), "Q0005");
}
