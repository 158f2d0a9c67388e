//! Member discovery for host value types.
//!
//! Methods and properties are not declared in the data context directly.
//! Instead a provider is registered per type and asked for the members of a
//! type when a query needs them.

use std::fmt;
use std::sync::Arc;

use crate::{
    member::{MethodSymbol, PropertySymbol},
    ty::Ty,
};

/// Supplies the methods invocable on values of a type.
pub trait MethodProvider: Send + Sync {
    fn methods(&self, ty: &Ty) -> Vec<Arc<MethodSymbol>>;
}

/// Supplies the properties readable on values of a type.
pub trait PropertyProvider: Send + Sync {
    fn properties(&self, ty: &Ty) -> Vec<Arc<PropertySymbol>>;
}

impl<F> MethodProvider for F
where
    F: Fn(&Ty) -> Vec<Arc<MethodSymbol>> + Send + Sync,
{
    fn methods(&self, ty: &Ty) -> Vec<Arc<MethodSymbol>> {
        self(ty)
    }
}

impl<F> PropertyProvider for F
where
    F: Fn(&Ty) -> Vec<Arc<PropertySymbol>> + Send + Sync,
{
    fn properties(&self, ty: &Ty) -> Vec<Arc<PropertySymbol>> {
        self(ty)
    }
}

/// A provider with a fixed member list. Every lookup returns the same symbols.
#[derive(Debug, Default)]
pub struct StaticMembers<T> {
    members: Vec<Arc<T>>,
}

impl<T> StaticMembers<T> {
    pub fn new(members: impl IntoIterator<Item = T>) -> Self {
        StaticMembers {
            members: members.into_iter().map(Arc::new).collect(),
        }
    }
}

impl MethodProvider for StaticMembers<MethodSymbol> {
    fn methods(&self, _ty: &Ty) -> Vec<Arc<MethodSymbol>> {
        self.members.clone()
    }
}

impl PropertyProvider for StaticMembers<PropertySymbol> {
    fn properties(&self, _ty: &Ty) -> Vec<Arc<PropertySymbol>> {
        self.members.clone()
    }
}

/// Answers every lookup with no members.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProvider;

impl MethodProvider for NullProvider {
    fn methods(&self, _ty: &Ty) -> Vec<Arc<MethodSymbol>> {
        Vec::new()
    }
}

impl PropertyProvider for NullProvider {
    fn properties(&self, _ty: &Ty) -> Vec<Arc<PropertySymbol>> {
        Vec::new()
    }
}

/// Provider kinds that have a fallback answering with no members.
pub trait FallbackProvider {
    fn fallback() -> Arc<Self>;
}

impl FallbackProvider for dyn MethodProvider {
    fn fallback() -> Arc<Self> {
        Arc::new(NullProvider)
    }
}

impl FallbackProvider for dyn PropertyProvider {
    fn fallback() -> Arc<Self> {
        Arc::new(NullProvider)
    }
}

/// Providers keyed by the value type they serve.
pub struct ProviderRegistry<P: ?Sized> {
    entries: Vec<(Ty, Arc<P>)>,
}

pub type MethodProviderRegistry = ProviderRegistry<dyn MethodProvider>;
pub type PropertyProviderRegistry = ProviderRegistry<dyn PropertyProvider>;

impl<P: ?Sized + FallbackProvider> ProviderRegistry<P> {
    pub fn new() -> Self {
        ProviderRegistry {
            entries: Vec::new(),
        }
    }

    /// Registers `provider` for `ty`, replacing any earlier registration.
    pub fn register(&mut self, ty: Ty, provider: Arc<P>) {
        match self.entries.iter_mut().find(|(key, _)| *key == ty) {
            Some(entry) => entry.1 = provider,
            None => self.entries.push((ty, provider)),
        }
    }

    pub fn get(&self, ty: &Ty) -> Option<&Arc<P>> {
        self.entries
            .iter()
            .find(|(key, _)| key == ty)
            .map(|(_, provider)| provider)
    }

    /// Returns the most specific provider for `ty`.
    ///
    /// The exact type is tried first, then the bases of a host type from
    /// nearest to farthest, then `OBJECT`. If nothing is registered a
    /// provider with no members is returned.
    pub fn lookup_value(&self, ty: &Ty) -> Arc<P> {
        if let Some(provider) = self.get(ty) {
            return provider.clone();
        }

        if let Ty::Host(host) = ty {
            for base in host.ancestors() {
                if let Some(provider) = self.get(&Ty::Host(base.clone())) {
                    return provider.clone();
                }
            }
        }

        self.get(&Ty::Object).cloned().unwrap_or_else(P::fallback)
    }

    pub fn types(&self) -> impl Iterator<Item = &Ty> {
        self.entries.iter().map(|(ty, _)| ty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: ?Sized + FallbackProvider> Default for ProviderRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> Clone for ProviderRegistry<P> {
    fn clone(&self) -> Self {
        ProviderRegistry {
            entries: self.entries.clone(),
        }
    }
}

impl<P: ?Sized> fmt::Debug for ProviderRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.entries.iter().map(|(ty, _)| ty))
            .finish()
    }
}
