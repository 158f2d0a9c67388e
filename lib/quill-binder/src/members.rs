//! Per-type memoization of provider lookups.
//!
//! Providers may build fresh symbols on every call. Caching the first answer
//! per type keeps member symbols stable, so two references to `x.Length`
//! within one compilation resolve to the same symbol.

use std::collections::HashMap;
use std::sync::Arc;

use quill_symbols::{DataContext, MethodSymbol, PropertySymbol, Ty};

#[derive(Debug, Default, Clone)]
pub struct MemberCache {
    methods: HashMap<Ty, Vec<Arc<MethodSymbol>>>,
    properties: HashMap<Ty, Vec<Arc<PropertySymbol>>>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The methods of `ty`, asking the most specific provider on first use.
    pub fn methods(&mut self, data_context: &DataContext, ty: &Ty) -> Vec<Arc<MethodSymbol>> {
        self.methods
            .entry(ty.clone())
            .or_insert_with(|| {
                tracing::trace!(%ty, "querying method provider");
                data_context.method_providers().lookup_value(ty).methods(ty)
            })
            .clone()
    }

    /// The properties of `ty`, asking the most specific provider on first use.
    pub fn properties(&mut self, data_context: &DataContext, ty: &Ty) -> Vec<Arc<PropertySymbol>> {
        self.properties
            .entry(ty.clone())
            .or_insert_with(|| {
                tracing::trace!(%ty, "querying property provider");
                data_context.property_providers().lookup_value(ty).properties(ty)
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.methods.len() + self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.properties.is_empty()
    }
}
