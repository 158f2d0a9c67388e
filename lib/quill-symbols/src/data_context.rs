use std::sync::Arc;

use crate::{
    function::{AggregateSymbol, FunctionSymbol},
    provider::{MethodProvider, MethodProviderRegistry, PropertyProvider, PropertyProviderRegistry},
    table::SchemaTableSymbol,
    ty::{HostType, Ty},
    variable::VariableSymbol,
};

/// The catalog a query is bound against.
///
/// A `DataContext` never changes once built. The `with_*` methods return a
/// new context that shares every collection they do not replace.
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    tables: Arc<Vec<Arc<SchemaTableSymbol>>>,
    functions: Arc<Vec<Arc<FunctionSymbol>>>,
    aggregates: Arc<Vec<Arc<AggregateSymbol>>>,
    variables: Arc<Vec<Arc<VariableSymbol>>>,
    host_types: Arc<Vec<HostType>>,
    method_providers: Arc<MethodProviderRegistry>,
    property_providers: Arc<PropertyProviderRegistry>,
}

impl DataContext {
    pub fn empty() -> Self {
        DataContext::default()
    }

    pub fn builder() -> DataContextBuilder {
        DataContextBuilder::default()
    }

    pub fn tables(&self) -> &[Arc<SchemaTableSymbol>] {
        &self.tables
    }

    pub fn functions(&self) -> &[Arc<FunctionSymbol>] {
        &self.functions
    }

    pub fn aggregates(&self) -> &[Arc<AggregateSymbol>] {
        &self.aggregates
    }

    pub fn variables(&self) -> &[Arc<VariableSymbol>] {
        &self.variables
    }

    pub fn host_types(&self) -> &[HostType] {
        &self.host_types
    }

    pub fn method_providers(&self) -> &MethodProviderRegistry {
        &self.method_providers
    }

    pub fn property_providers(&self) -> &PropertyProviderRegistry {
        &self.property_providers
    }

    /// Resolves a type name written in a CAST: primitives first, then
    /// registered host types. Host type names are compared ignoring case.
    pub fn resolve_type_name(&self, name: &str) -> Option<Ty> {
        Ty::parse_name(name).or_else(|| {
            self.host_types
                .iter()
                .find(|host| host.name().eq_ignore_ascii_case(name))
                .map(|host| Ty::Host(host.clone()))
        })
    }

    pub fn with_tables(&self, tables: impl IntoIterator<Item = Arc<SchemaTableSymbol>>) -> Self {
        DataContext {
            tables: Arc::new(tables.into_iter().collect()),
            ..self.clone()
        }
    }

    pub fn with_functions(&self, functions: impl IntoIterator<Item = Arc<FunctionSymbol>>) -> Self {
        DataContext {
            functions: Arc::new(functions.into_iter().collect()),
            ..self.clone()
        }
    }

    pub fn with_aggregates(
        &self,
        aggregates: impl IntoIterator<Item = Arc<AggregateSymbol>>,
    ) -> Self {
        DataContext {
            aggregates: Arc::new(aggregates.into_iter().collect()),
            ..self.clone()
        }
    }

    pub fn with_variables(&self, variables: impl IntoIterator<Item = Arc<VariableSymbol>>) -> Self {
        DataContext {
            variables: Arc::new(variables.into_iter().collect()),
            ..self.clone()
        }
    }

    pub fn with_host_types(&self, host_types: impl IntoIterator<Item = HostType>) -> Self {
        DataContext {
            host_types: Arc::new(host_types.into_iter().collect()),
            ..self.clone()
        }
    }

    pub fn with_method_providers(&self, providers: MethodProviderRegistry) -> Self {
        DataContext {
            method_providers: Arc::new(providers),
            ..self.clone()
        }
    }

    pub fn with_property_providers(&self, providers: PropertyProviderRegistry) -> Self {
        DataContext {
            property_providers: Arc::new(providers),
            ..self.clone()
        }
    }
}

/// Collects catalog entries and produces a [`DataContext`].
#[derive(Debug, Default)]
pub struct DataContextBuilder {
    tables: Vec<Arc<SchemaTableSymbol>>,
    functions: Vec<Arc<FunctionSymbol>>,
    aggregates: Vec<Arc<AggregateSymbol>>,
    variables: Vec<Arc<VariableSymbol>>,
    host_types: Vec<HostType>,
    method_providers: MethodProviderRegistry,
    property_providers: PropertyProviderRegistry,
}

impl DataContextBuilder {
    pub fn table(mut self, table: SchemaTableSymbol) -> Self {
        self.tables.push(Arc::new(table));
        self
    }

    pub fn function(mut self, function: FunctionSymbol) -> Self {
        self.functions.push(Arc::new(function));
        self
    }

    pub fn aggregate(mut self, aggregate: AggregateSymbol) -> Self {
        self.aggregates.push(Arc::new(aggregate));
        self
    }

    /// Adds a variable. The caller keeps the `Arc` to assign values later.
    pub fn variable(mut self, variable: Arc<VariableSymbol>) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn host_type(mut self, host_type: HostType) -> Self {
        self.host_types.push(host_type);
        self
    }

    pub fn method_provider(mut self, ty: Ty, provider: impl MethodProvider + 'static) -> Self {
        self.method_providers.register(ty, Arc::new(provider));
        self
    }

    pub fn property_provider(mut self, ty: Ty, provider: impl PropertyProvider + 'static) -> Self {
        self.property_providers.register(ty, Arc::new(provider));
        self
    }

    /// Registers COUNT, SUM, AVG, MIN and MAX.
    pub fn with_default_aggregates(self) -> Self {
        self.aggregate(AggregateSymbol::count())
            .aggregate(AggregateSymbol::sum())
            .aggregate(AggregateSymbol::avg())
            .aggregate(AggregateSymbol::min())
            .aggregate(AggregateSymbol::max())
    }

    pub fn build(self) -> DataContext {
        DataContext {
            tables: self.tables.into(),
            functions: self.functions.into(),
            aggregates: self.aggregates.into(),
            variables: self.variables.into(),
            host_types: self.host_types.into(),
            method_providers: Arc::new(self.method_providers),
            property_providers: Arc::new(self.property_providers),
        }
    }
}
