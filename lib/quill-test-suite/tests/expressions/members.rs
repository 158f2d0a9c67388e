use quill_test_suite::dsl::*;
use quill_test_suite::*;

mod properties {
    use super::*;

    #[test]
    fn property_of_host_type() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Location").dot("X")]).from(table("Customers").alias("c")),
        )
        .expect(NoDiagnostics)
        .expect(
            SymbolOf::new("c.Location.X")
                .is(SymbolKind::Property)
                .named("X")
                .has_type(Ty::Float64),
        )
        .expect(SymbolOf::new("c.Location").is(SymbolKind::TableColumnInstance))
        .expect(OutputColumns::new(["X"]).with_types([Ty::Float64]));
    }

    #[test]
    fn property_from_provider_function() {
        Test::new(
            catalogs::sales(),
            select([name("Notes").dot("Length")]).from(table("Orders")),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("Notes.Length").is(SymbolKind::Property).has_type(Ty::Int32))
        .expect(SymbolOf::new("Notes").is(SymbolKind::TableColumnInstance));
    }

    #[test]
    fn property_name_ignores_case() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Location").dot("y")]).from(table("Customers").alias("c")),
        )
        .expect(NoDiagnostics)
        .expect(SymbolOf::new("c.Location.y").named("Y"));
    }

    #[test]
    fn unknown_property() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Location").dot("Z")]).from(table("Customers").alias("c")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("Z")
                .containing("type Point has no property 'Z'"),
        )
        .expect(TypeOf::new("c.Location.Z").is(Ty::Unknown));
    }

    #[test]
    fn type_without_properties() {
        Test::new(
            catalogs::sales(),
            select([name("Id").dot("Foo")]).from(table("Orders")),
        )
        .expect(Reports::new(DiagnosticId::UnresolvedName).containing("type INT has no property 'Foo'"));
    }

    #[test]
    fn unknown_target_is_reported_once() {
        Test::new(
            catalogs::sales(),
            select([name("Missing").dot("X").dot("Y")]).from(table("Orders")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(Reports::new(DiagnosticId::UnresolvedName).at("Missing"));
    }
}

mod methods {
    use super::*;

    #[test]
    fn method_of_host_type() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Location").method("DistanceTo", [qualified("c", "Location")])])
                .from(table("Customers").alias("c")),
        )
        .expect(NoDiagnostics)
        .expect(
            SymbolOf::new("c.Location.DistanceTo(c.Location)")
                .is(SymbolKind::Method)
                .named("DistanceTo"),
        )
        .expect(TypeOf::new("c.Location.DistanceTo(c.Location)").is(Ty::Float64));
    }

    #[test]
    fn chained_member_access() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Location")
                .method("Scale", [int(2)])
                .dot("X")])
            .from(table("Customers").alias("c")),
        )
        .expect(NoDiagnostics)
        .expect(TypeOf::new("c.Location.Scale(2)").is(Ty::Host(catalogs::point())))
        .expect(TypeOf::new("c.Location.Scale(2).X").is(Ty::Float64));
    }

    #[test]
    fn argument_does_not_convert() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Location").method("Scale", [string("x")])])
                .from(table("Customers").alias("c")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::TypeMismatch)
                .containing("no overload of method 'Scale' accepts arguments (VARCHAR)"),
        );
    }

    #[test]
    fn unknown_method() {
        Test::new(
            catalogs::sales(),
            select([qualified("c", "Location").method("Rotate", [])])
                .from(table("Customers").alias("c")),
        )
        .expect(HasDiagnosticCount(1))
        .expect(
            Reports::new(DiagnosticId::UnresolvedName)
                .at("Rotate")
                .containing("type Point has no method 'Rotate'"),
        )
        .expect(SymbolOf::new("c.Location.Rotate()").is(SymbolKind::BadSymbol));
    }
}
