use parking_lot::RwLock;
use thiserror::Error;

use crate::{conversion::Conversion, id::SymbolId, ty::Ty, value::Value};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VariableError {
    #[error("the value '{value}' cannot be assigned to variable of type {ty}")]
    TypeMismatch { value: String, ty: Ty },
}

/// A named value supplied by the host, readable from queries as `@name`.
///
/// The declared type is fixed. The current value lives in its own lock and
/// is never touched by binding.
#[derive(Debug)]
pub struct VariableSymbol {
    id: SymbolId,
    name: String,
    ty: Ty,
    value: RwLock<Value>,
}

impl VariableSymbol {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        VariableSymbol {
            id: SymbolId::new(),
            name: name.into(),
            ty,
            value: RwLock::new(Value::Null),
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Ty {
        &self.ty
    }

    pub fn value(&self) -> Value {
        self.value.read().clone()
    }

    /// Replaces the current value.
    ///
    /// `NULL` is always accepted. Otherwise the value's runtime type must be
    /// the declared type or a host subtype of it, unless the variable is
    /// declared as `OBJECT`. On failure the previous value is kept.
    pub fn set_value(&self, value: Value) -> Result<(), VariableError> {
        if !accepts(&self.ty, &value) {
            return Err(VariableError::TypeMismatch {
                value: value.to_string(),
                ty: self.ty.clone(),
            });
        }

        *self.value.write() = value;
        Ok(())
    }
}

fn accepts(declared: &Ty, value: &Value) -> bool {
    if value.is_null() || matches!(declared, Ty::Object) {
        return true;
    }

    match (value.ty(), declared) {
        (Ty::Host(actual), Ty::Host(_)) => {
            Conversion::classify(&Ty::Host(actual), declared).is_implicit()
        }
        (actual, declared) => actual == *declared,
    }
}
