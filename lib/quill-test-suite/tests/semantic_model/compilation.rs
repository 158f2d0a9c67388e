use std::sync::Arc;

use quill_compiler::Compilation;
use quill_test_suite::dsl::*;
use quill_test_suite::*;

fn notes_query() -> Select {
    select([name("Notes")]).from(table("Orders"))
}

#[test]
fn replacing_the_catalog_rebinds() {
    let compilation = Compilation::builder()
        .syntax_tree(notes_query().to_syntax_tree())
        .data_context(catalogs::orders())
        .build();
    assert_eq!(compilation.semantic_model().diagnostics().len(), 1);

    let updated = compilation.with_data_context(catalogs::sales());
    assert!(updated.syntax_tree().ptr_eq(compilation.syntax_tree()));
    assert!(updated.semantic_model().diagnostics().is_empty());

    // The original compilation is unchanged
    assert_eq!(compilation.semantic_model().diagnostics().len(), 1);
}

#[test]
fn same_values_return_an_equivalent_compilation() {
    let data_context = catalogs::sales();
    let compilation = Compilation::new(notes_query().to_syntax_tree(), data_context.clone());

    let same = compilation.with_data_context(data_context.clone());
    assert!(Arc::ptr_eq(same.data_context(), &data_context));
    assert!(same.syntax_tree().ptr_eq(compilation.syntax_tree()));
}

#[test]
fn replacing_the_query_rebinds() {
    let compilation = Compilation::new(notes_query().to_syntax_tree(), catalogs::sales());
    let updated = compilation.with_syntax_tree(
        select([name("Missing")]).from(table("Orders")).to_syntax_tree(),
    );

    assert!(compilation.semantic_model().diagnostics().is_empty());
    assert_eq!(updated.semantic_model().diagnostics().len(), 1);
}

#[test]
fn nodes_of_another_tree_are_not_bound() {
    let compilation = Compilation::new(notes_query().to_syntax_tree(), catalogs::sales());
    let model = compilation.semantic_model();

    let foreign = notes_query().to_syntax_tree();
    let node = foreign.root().first_child().expect("tree has a query");
    assert!(model.bound_node(&node).is_none());
    assert!(model.symbol(&node).is_none());
}

mod members {
    use super::*;

    #[test]
    fn properties_and_methods_of_host_type() {
        let mut test = Test::new(catalogs::sales(), notes_query());
        let model = test.model();
        let point = Ty::Host(catalogs::point());

        let properties: Vec<String> = model
            .lookup_properties(&point)
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(properties, ["X", "Y"]);

        let methods: Vec<String> = model
            .lookup_methods(&point)
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(methods, ["DistanceTo", "Scale"]);
    }

    #[test]
    fn member_lists_are_cached() {
        let mut test = Test::new(catalogs::sales(), notes_query());
        let model = test.model();

        let first = model.lookup_properties(&Ty::String);
        let second = model.lookup_properties(&Ty::String);
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first[0], &second[0]));
    }

    #[test]
    fn types_without_providers_have_no_members() {
        let mut test = Test::new(catalogs::sales(), notes_query());
        let model = test.model();

        assert!(model.lookup_properties(&Ty::Int32).is_empty());
        assert!(model.lookup_methods(&Ty::String).is_empty());
    }
}

#[test]
fn conversion_classification() {
    let mut test = Test::new(catalogs::sales(), notes_query());
    let model = test.model();

    assert_eq!(model.classify_conversion(&Ty::Int32, &Ty::Int64), Conversion::Implicit);
    assert_eq!(model.classify_conversion(&Ty::Decimal, &Ty::Int32), Conversion::Explicit);
    assert_eq!(model.classify_conversion(&Ty::String, &Ty::String), Conversion::Identity);
    assert_eq!(model.classify_conversion(&Ty::String, &Ty::DateTime), Conversion::None);
}
