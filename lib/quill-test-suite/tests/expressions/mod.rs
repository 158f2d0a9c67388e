//! Tests for expression typing

mod literals;
mod operators;
mod casts;
mod calls;
mod members;
mod case;
mod subselects;
