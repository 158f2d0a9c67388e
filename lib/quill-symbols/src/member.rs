use std::sync::Arc;

use crate::{
    function::{parameters, ParameterSymbol},
    id::SymbolId,
    ty::Ty,
};

/// A method invocable on values of a host type, as in `value.Method(args)`.
#[derive(Debug)]
pub struct MethodSymbol {
    id: SymbolId,
    name: String,
    host: Ty,
    parameters: Vec<Arc<ParameterSymbol>>,
    return_type: Ty,
}

impl MethodSymbol {
    pub fn new<I, S>(host: Ty, name: impl Into<String>, parameters: I, return_type: Ty) -> Self
    where
        I: IntoIterator<Item = (S, Ty)>,
        S: Into<String>,
    {
        MethodSymbol {
            id: SymbolId::new(),
            name: name.into(),
            host,
            parameters: self::parameters(parameters),
            return_type,
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type the method is declared on.
    pub fn host(&self) -> &Ty {
        &self.host
    }

    pub fn parameters(&self) -> &[Arc<ParameterSymbol>] {
        &self.parameters
    }

    pub fn return_type(&self) -> &Ty {
        &self.return_type
    }
}

/// A property readable on values of a host type, as in `value.Property`.
#[derive(Debug)]
pub struct PropertySymbol {
    id: SymbolId,
    name: String,
    host: Ty,
    ty: Ty,
}

impl PropertySymbol {
    pub fn new(host: Ty, name: impl Into<String>, ty: Ty) -> Self {
        PropertySymbol {
            id: SymbolId::new(),
            name: name.into(),
            host,
            ty,
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &Ty {
        &self.host
    }

    pub fn ty(&self) -> &Ty {
        &self.ty
    }
}
