//! Tests for query structure and scoping

mod joins;
mod derived_tables;
mod common_table_expressions;
mod order_by;
