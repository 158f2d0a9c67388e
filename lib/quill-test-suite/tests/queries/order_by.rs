use quill_binder::BoundQuery;
use quill_test_suite::dsl::*;
use quill_test_suite::*;

mod names {
    use super::*;

    #[test]
    fn output_column_alias() {
        Test::new(
            catalogs::sales(),
            select([name("Total").alias("Amount")])
                .from(table("Orders").alias("o"))
                .order_by([desc(name("Amount"))]),
        )
        .expect(NoDiagnostics)
        .expect(
            SymbolOf::new("Amount")
                .is(SymbolKind::QueryColumnInstance)
                .has_type(Ty::Decimal),
        );
    }

    #[test]
    fn output_column_shadows_table_column() {
        Test::new(
            catalogs::sales(),
            select([name("Total").alias("Id")])
                .from(table("Orders"))
                .order_by([name("Id")]),
        )
        .expect(NoDiagnostics)
        .expect(
            SymbolOf::new("Id")
                .is(SymbolKind::QueryColumnInstance)
                .has_type(Ty::Decimal),
        );
    }

    #[test]
    fn table_column_not_in_select_list() {
        Test::new(
            catalogs::sales(),
            select([name("Total")])
                .from(table("Orders").alias("o"))
                .order_by([asc(qualified("o", "OrderDate")), desc(name("Id"))]),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("o.OrderDate").is(SymbolKind::TableColumnInstance))
        .expect(SymbolOf::new("Id").is(SymbolKind::TableColumnInstance));
    }

    #[test]
    fn top_keeps_table_scope() {
        Test::new(
            catalogs::sales(),
            select([name("Id")])
                .top(5)
                .with_ties()
                .from(table("Orders"))
                .order_by([desc(name("Total"))]),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("Total").is(SymbolKind::TableColumnInstance));
    }

    #[test]
    fn set_operation_sees_only_output_columns() {
        Test::new(
            catalogs::sales(),
            select([name("Id")])
                .from(table("Orders"))
                .union(select([name("Id")]).from(table("Customers")))
                .order_by([name("Id"), name("Total")]),
        )
        .expect(HasDiagnosticCount(1))
        .expect(SymbolOf::new("Id").nth(2).is(SymbolKind::QueryColumnInstance))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("Total"));
    }
}

mod ordinals {
    use super::*;

    #[test]
    fn position_refers_to_output_column() {
        Test::new(
            catalogs::sales(),
            select([name("Id"), name("Total")])
                .from(table("Orders"))
                .order_by([int(2)]),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("2").is(Ty::Decimal));
    }

    #[test]
    fn position_out_of_range() {
        Test::new(
            catalogs::sales(),
            select([name("Id"), name("Total")])
                .from(table("Orders"))
                .order_by([int(3)]),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::StructuralShapeMismatch)
                .at("3")
                .containing("ORDER BY position 3 is out of range, the query has 2 columns"),
        );
    }
}

#[test]
fn direction_is_recorded() {
    let mut test = Test::new(
        catalogs::sales(),
        select([name("Id"), name("Total")])
            .from(table("Orders"))
            .order_by([asc(name("Id")), desc(name("Total")), name("Id").into()]),
    )
    .expect(NoDiagnostics);

    let model = test.model();
    let root = model
        .binding_result()
        .root()
        .first_child()
        .expect("tree has a query");
    match model.bound_node(&root).and_then(|node| node.as_query()) {
        Some(BoundQuery::Ordered(ordered)) => {
            let descending: Vec<bool> = ordered.columns.iter().map(|c| c.descending).collect();
            assert_eq!(descending, vec![false, true, false]);
        }
        other => panic!("expected ORDER BY, got {:?}", other.map(|query| query.kind())),
    }
}
