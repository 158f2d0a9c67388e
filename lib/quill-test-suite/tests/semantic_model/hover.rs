use quill_test_suite::dsl::*;
use quill_test_suite::*;

fn orders() -> Select {
    select([
        qualified("o", "Id").into(),
        name("Total").alias("Amount"),
        call("ABS", [name("Total")]).into(),
    ])
    .from(table("Orders").alias("o"))
}

#[test]
fn qualifier_and_column() {
    Test::new(catalogs::sales(), orders())
        .expect(HoverAt::new("o.Id").is(SymbolKind::TableInstance).named("o"))
        .expect(HoverAt::new("Id,").is(SymbolKind::TableColumnInstance).named("Id"));
}

#[test]
fn table_name_shows_schema_table() {
    Test::new(catalogs::sales(), orders())
        .expect(HoverAt::new("Orders o").is(SymbolKind::SchemaTable).named("Orders"));

    Test::new(catalogs::sales(), select([name("Id")]).from(table("Orders")))
        .expect(HoverAt::new("Orders").is(SymbolKind::SchemaTable).named("Orders"));
}

#[test]
fn table_alias_shows_instance() {
    let mut test = Test::new(catalogs::sales(), orders());
    let text = orders().text();
    let model = test.model();

    let alias = text.rfind(" o").expect("text occurs") + 1;
    let symbol = model.symbol_at(alias).expect("alias has a symbol");
    assert_eq!(symbol.kind(), SymbolKind::TableInstance);
    assert_eq!(symbol.name(), "o");
}

#[test]
fn alias_shows_output_column() {
    Test::new(catalogs::sales(), orders())
        .expect(HoverAt::new("Amount").is(SymbolKind::QueryColumnInstance).named("Amount"));
}

#[test]
fn function_name() {
    Test::new(catalogs::sales(), orders())
        .expect(HoverAt::new("ABS").is(SymbolKind::Function).named("ABS"));
}

#[test]
fn common_table_expression_name() {
    Test::new(
        catalogs::sales(),
        with(
            [cte("Big", select([name("Id")]).from(table("Orders")))],
            select([star()]).from(table("Big")),
        ),
    )
    .expect(HoverAt::new("Big").is(SymbolKind::CommonTableExpression));
}

#[test]
fn nothing_at_keywords_or_past_the_end() {
    let mut test = Test::new(catalogs::sales(), orders());
    let text = orders().text();
    let model = test.model();

    let from = text.find("FROM").expect("text occurs");
    assert!(model.symbol_at(from).is_none());
    assert!(model.symbol_at(text.len() + 10).is_none());
}
