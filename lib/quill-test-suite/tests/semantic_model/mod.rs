//! Tests for the semantic model's editor queries

mod hover;
mod diagnostics;
mod compilation;
