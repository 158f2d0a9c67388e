//! Quill Test Suite
//!
//! This test suite is organized by binding domain:
//!
//! - `names/` - Name resolution (columns, table instances, variables, case sensitivity)
//! - `expressions/` - Expression typing (literals, operators, casts, calls, members, CASE, subqueries)
//! - `queries/` - Query structure (SELECT, joins, derived tables, WITH, set operations, ORDER BY)
//! - `semantic_model/` - Editor queries (lookup, hover, declared symbols, diagnostics, compilations)

mod expressions;
mod queries;
mod semantic_model;
