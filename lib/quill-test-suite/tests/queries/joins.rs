use quill_binder::{BoundNode, BoundTableReference};
use quill_syntax_tree::ast::JoinType;
use quill_syntax_tree::SyntaxKind;
use quill_test_suite::dsl::*;
use quill_test_suite::*;

mod self_join {
    use super::*;

    fn self_join() -> Select {
        select([qualified("a", "Id"), qualified("b", "Id")]).from(
            table("Orders")
                .alias("a")
                .join(table("Orders").alias("b"))
                .on(qualified("a", "Id").eq(qualified("b", "Id"))),
        )
    }

    #[test]
    fn instances_are_distinct() {
        Test::new(catalogs::orders(), self_join())
            .expect(NoDiagnostics)
            .expect(DeclaredSymbolOf::new("Orders a").named("a"))
            .expect(DeclaredSymbolOf::new("Orders b").named("b"))
            .expect(SymbolOf::new("a").different_from("b", 0))
            .expect(SymbolOf::new("a.Id").different_from("b.Id", 0));
    }

    #[test]
    fn column_instances_are_shared_per_instance() {
        Test::new(catalogs::orders(), self_join())
            .expect(SymbolOf::new("a.Id").same_as("a.Id", 1))
            .expect(SymbolOf::new("b.Id").same_as("b.Id", 1));
    }

    #[test]
    fn unqualified_column_is_ambiguous() {
        Test::new(
            catalogs::orders(),
            select([name("Total")]).from(
                table("Orders")
                    .alias("a")
                    .join(table("Orders").alias("b"))
                    .on(qualified("a", "Id").eq(qualified("b", "Id"))),
            ),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::AmbiguousReference)
                .at("Total")
                .containing("'Total' is ambiguous"),
        );
    }

    #[test]
    fn duplicate_alias_is_ambiguous() {
        Test::new(
            catalogs::orders(),
            select([qualified("a", "Id")])
                .from(table("Orders").alias("a"))
                .from(table("Orders").alias("a")),
        )
        .expect(Reports::new(DiagnosticId::AmbiguousReference).at("a"));
    }
}

mod on_condition {
    use super::*;

    #[test]
    fn must_be_boolean() {
        Test::new(
            catalogs::sales(),
            select([star()]).from(
                table("Orders")
                    .alias("o")
                    .join(table("Customers").alias("c"))
                    .on(qualified("o", "Id")),
            ),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::TypeMismatch).containing("ON condition must be BOOLEAN"));
    }

    #[test]
    fn cannot_see_later_table_references() {
        Test::new(
            catalogs::sales(),
            select([star()])
                .from(
                    table("Orders")
                        .alias("o")
                        .join(table("Customers").alias("c"))
                        .on(qualified("o", "CustomerId").eq(qualified("x", "Id"))),
                )
                .from(table("Orders").alias("x")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("x"));
    }

    #[test]
    fn nested_joins_see_inner_instances() {
        Test::new(
            catalogs::sales(),
            select([qualified("o2", "Total")]).from(
                table("Orders")
                    .alias("o")
                    .join(table("Customers").alias("c"))
                    .on(qualified("o", "CustomerId").eq(qualified("c", "Id")))
                    .left_join(table("Orders").alias("o2"))
                    .on(qualified("o2", "CustomerId").eq(qualified("c", "Id"))),
            ),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("o2.Total").has_type(Ty::Decimal));
    }

    #[test]
    fn parenthesized_join() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Name")]).from(paren_table(
                table("Orders")
                    .alias("o")
                    .join(table("Customers").alias("c"))
                    .on(qualified("o", "CustomerId").eq(qualified("c", "Id"))),
            )),
        )
        .expect(NoDiagnostics)
        .expect(DeclaredSymbolOf::new("Customers c").named("c"));
    }
}

mod right_side {
    use super::*;

    fn customer_of(outer: &str) -> Table {
        derived(
            select([name("Id"), name("City")])
                .from(table("Customers"))
                .where_(name("Id").eq(qualified(outer, "CustomerId"))),
            "c",
        )
    }

    #[test]
    fn inner_join_sees_left_instances() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "City")]).from(
                table("Orders")
                    .alias("o")
                    .join(customer_of("o"))
                    .on(qualified("c", "Id").eq(qualified("o", "CustomerId"))),
            ),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("o").is(SymbolKind::TableInstance).named("o"))
        .expect(
            SymbolOf::new("o.CustomerId")
                .is(SymbolKind::TableColumnInstance)
                .same_as("o.CustomerId", 1),
        );
    }

    #[test]
    fn left_join_sees_left_instances() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "City")]).from(
                table("Orders")
                    .alias("o")
                    .left_join(customer_of("o"))
                    .on(qualified("c", "Id").eq(qualified("o", "CustomerId"))),
            ),
        )
        .expect(NoDiagnostics);
    }

    #[test]
    fn cross_join_does_not_see_left_instances() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "City")])
                .from(table("Orders").alias("o").cross_join(customer_of("o"))),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("o")
                .containing("table or column 'o' does not exist"),
        );
    }

    #[test]
    fn left_instances_do_not_leak_past_the_join() {
        Test::new(
            catalogs::sales(),
            select([star()])
                .from(table("Orders").alias("o").join(table("Customers").alias("c")).on(
                    qualified("o", "CustomerId").eq(qualified("c", "Id")),
                ))
                .from(customer_of("o")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("o"));
    }
}

#[test]
fn join_type_is_recorded() {
    let mut test = Test::new(
        catalogs::sales(),
        select([star()]).from(
            table("Orders")
                .alias("o")
                .left_join(table("Customers").alias("c"))
                .on(qualified("o", "CustomerId").eq(qualified("c", "Id"))),
        ),
    )
    .expect(NoDiagnostics);

    let model = test.model();
    let join = model
        .binding_result()
        .root()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::JoinedTableReference)
        .expect("tree has a join");

    match model.bound_node(&join) {
        Some(BoundNode::TableReference(BoundTableReference::Joined(joined))) => {
            assert_eq!(joined.join_type, JoinType::LeftOuter);
            assert!(joined.condition.is_some());
        }
        other => panic!("join is not bound as a join: {:?}", other.map(|node| node.kind())),
    }
}

#[test]
fn cross_join_has_no_condition() {
    Test::new(
        catalogs::sales(),
        select([qualified("o", "Id"), qualified("c", "Id")])
            .from(table("Orders").alias("o").cross_join(table("Customers").alias("c"))),
    )
    .expect(NoDiagnostics)
    .expect(OutputColumns::new(["Id", "Id"]));
}
