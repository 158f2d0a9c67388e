//! Data contexts shared by the tests.

use std::sync::Arc;

use quill_symbols::{
    DataContext, FunctionSymbol, HostType, MethodSymbol, PropertySymbol, SchemaTableSymbol,
    StaticMembers, Ty, VariableSymbol,
};

/// A single `Orders(Id INT, Total DECIMAL)` table and nothing else.
pub fn orders() -> Arc<DataContext> {
    Arc::new(
        DataContext::builder()
            .table(SchemaTableSymbol::new(
                "Orders",
                [("Id", Ty::Int32), ("Total", Ty::Decimal)],
            ))
            .build(),
    )
}

/// The host type of `Customers.Location`.
pub fn point() -> HostType {
    HostType::new("Point")
}

/// A small sales schema with functions, aggregates, variables and a host
/// type that has members.
///
/// - `Orders(Id, CustomerId, Total, OrderDate, Notes)`
/// - `Customers(Id, Name, City, Location)`
/// - `ABS` overloaded for `INT`, `DOUBLE` and `DECIMAL`
/// - `LEN(VARCHAR)`, `ROUND(DOUBLE, INT)`, `NOW()`
/// - the default aggregates
/// - `@Threshold INT` and `@City VARCHAR`
/// - `Point` with properties `X`, `Y` and methods `DistanceTo(Point)`, `Scale(DOUBLE)`
/// - `Length` property on `VARCHAR`
pub fn sales() -> Arc<DataContext> {
    let point = point();
    let point_ty = Ty::Host(point.clone());

    Arc::new(
        DataContext::builder()
            .table(SchemaTableSymbol::new(
                "Orders",
                [
                    ("Id", Ty::Int32),
                    ("CustomerId", Ty::Int32),
                    ("Total", Ty::Decimal),
                    ("OrderDate", Ty::DateTime),
                    ("Notes", Ty::String),
                ],
            ))
            .table(SchemaTableSymbol::new(
                "Customers",
                [
                    ("Id", Ty::Int32),
                    ("Name", Ty::String),
                    ("City", Ty::String),
                    ("Location", point_ty.clone()),
                ],
            ))
            .function(FunctionSymbol::new("ABS", [("value", Ty::Int32)], Ty::Int32))
            .function(FunctionSymbol::new("ABS", [("value", Ty::Float64)], Ty::Float64))
            .function(FunctionSymbol::new("ABS", [("value", Ty::Decimal)], Ty::Decimal))
            .function(FunctionSymbol::new("LEN", [("text", Ty::String)], Ty::Int32))
            .function(FunctionSymbol::new(
                "ROUND",
                [("value", Ty::Float64), ("digits", Ty::Int32)],
                Ty::Float64,
            ))
            .function(FunctionSymbol::new(
                "NOW",
                std::iter::empty::<(&str, Ty)>(),
                Ty::DateTime,
            ))
            .with_default_aggregates()
            .variable(Arc::new(VariableSymbol::new("Threshold", Ty::Int32)))
            .variable(Arc::new(VariableSymbol::new("City", Ty::String)))
            .host_type(point)
            .property_provider(
                point_ty.clone(),
                StaticMembers::new([
                    PropertySymbol::new(point_ty.clone(), "X", Ty::Float64),
                    PropertySymbol::new(point_ty.clone(), "Y", Ty::Float64),
                ]),
            )
            .method_provider(
                point_ty.clone(),
                StaticMembers::new([
                    MethodSymbol::new(
                        point_ty.clone(),
                        "DistanceTo",
                        [("other", point_ty.clone())],
                        Ty::Float64,
                    ),
                    MethodSymbol::new(
                        point_ty.clone(),
                        "Scale",
                        [("factor", Ty::Float64)],
                        point_ty.clone(),
                    ),
                ]),
            )
            .property_provider(Ty::String, |ty: &Ty| {
                vec![Arc::new(PropertySymbol::new(ty.clone(), "Length", Ty::Int32))]
            })
            .build(),
    )
}
