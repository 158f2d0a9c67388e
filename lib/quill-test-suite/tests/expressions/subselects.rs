use quill_test_suite::dsl::*;
use quill_test_suite::*;

mod single_row {
    use super::*;

    #[test]
    fn takes_type_of_its_column() {
        Test::new(
            catalogs::sales(),
            select([subselect(select([call("MAX", [name("Total")])]).from(table("Orders")))]),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("(SELECT MAX(Total) FROM Orders)").is(Ty::Decimal));
    }

    #[test]
    fn must_return_one_column() {
        Test::new(
            catalogs::sales(),
            select([subselect(select([name("Id"), name("Total")]).from(table("Orders")))]),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::StructuralShapeMismatch)
                .at("(SELECT Id, Total FROM Orders)")
                .containing("subquery must return exactly 1 column, found 2"),
        )
        .expect(TypeOf::new("(SELECT Id, Total FROM Orders)").is(Ty::Unknown));
    }
}

mod correlation {
    use super::*;

    #[test]
    fn exists_sees_outer_instances() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Id"), name("Name")])
                .from(table("Customers").alias("c"))
                .where_(exists(
                    select([int(1)])
                        .from(table("Orders").alias("o"))
                        .where_(qualified("o", "CustomerId").eq(qualified("c", "Id"))),
                )),
        )
        .expect(NoDiagnostics)
        .expect(
            SymbolOf::new("c.Id")
                .nth(1)
                .is(SymbolKind::TableColumnInstance)
                .same_as("c.Id", 0),
        )
        .expect(SymbolOf::new("o.CustomerId").different_from("c.Id", 0))
        .expect(TypeOf::new("EXISTS (SELECT 1 FROM Orders o WHERE o.CustomerId = c.Id)").is(Ty::Boolean));
    }

    #[test]
    fn inner_instances_are_not_visible_outside() {
        Test::new(
            catalogs::sales(),
            select([qualified("o", "Id")])
                .from(table("Customers").alias("c"))
                .where_(exists(select([int(1)]).from(table("Orders").alias("o")))),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("o"));
    }

    #[test]
    fn inner_alias_shadows_outer() {
        Test::new(
            catalogs::sales(),
            select([name("Name")])
                .from(table("Customers").alias("c"))
                .where_(exists(
                    select([int(1)])
                        .from(table("Orders").alias("c"))
                        .where_(qualified("c", "Total").gt(int(0))),
                )),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("c.Total").has_type(Ty::Decimal));
    }
}

mod quantified {
    use super::*;

    #[test]
    fn all_is_boolean() {
        Test::new(
            catalogs::sales(),
            select([star()])
                .from(table("Orders"))
                .where_(name("Total").gt_all(select([name("Total")]).from(table("Orders")))),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("Total > ALL (SELECT Total FROM Orders)").is(Ty::Boolean));
    }

    #[test]
    fn any_compares_with_the_column_type() {
        Test::new(
            catalogs::sales(),
            select([star()])
                .from(table("Orders"))
                .where_(name("Notes").eq_any(select([name("Id")]).from(table("Orders")))),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .containing("operator '=' cannot be applied to operands of type (VARCHAR, INT)"),
        );
    }
}
