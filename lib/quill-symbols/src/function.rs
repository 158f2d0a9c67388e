use std::sync::Arc;

use crate::{id::SymbolId, ty::Ty};

/// A parameter of a function or method.
#[derive(Debug)]
pub struct ParameterSymbol {
    id: SymbolId,
    name: String,
    ty: Ty,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        ParameterSymbol {
            id: SymbolId::new(),
            name: name.into(),
            ty,
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
}

pub(crate) fn parameters<I, S>(parameters: I) -> Vec<Arc<ParameterSymbol>>
where
    I: IntoIterator<Item = (S, Ty)>,
    S: Into<String>,
{
    parameters
        .into_iter()
        .map(|(name, ty)| Arc::new(ParameterSymbol::new(name, ty)))
        .collect()
}

/// A scalar function callable by name.
#[derive(Debug)]
pub struct FunctionSymbol {
    id: SymbolId,
    name: String,
    parameters: Vec<Arc<ParameterSymbol>>,
    return_type: Ty,
}

impl FunctionSymbol {
    pub fn new<I, S>(name: impl Into<String>, parameters: I, return_type: Ty) -> Self
    where
        I: IntoIterator<Item = (S, Ty)>,
        S: Into<String>,
    {
        FunctionSymbol {
            id: SymbolId::new(),
            name: name.into(),
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

    pub fn parameters(&self) -> &[Arc<ParameterSymbol>] {
        &self.parameters
    }

    pub fn return_type(&self) -> &Ty {
        &self.return_type
    }
}

/// What an aggregate accepts and produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateSignature {
    /// Accepts any argument and produces a fixed type, like COUNT.
    Any { return_type: Ty },
    /// Accepts a numeric argument and produces its type, like SUM.
    Numeric,
    /// Accepts any argument and produces its type, like MIN.
    SameAsArgument,
    /// Accepts a single fixed parameter type.
    Fixed { parameter: Ty, return_type: Ty },
}

/// An aggregate function over a group of rows.
#[derive(Debug)]
pub struct AggregateSymbol {
    id: SymbolId,
    name: String,
    signature: AggregateSignature,
}

impl AggregateSymbol {
    pub fn new(name: impl Into<String>, signature: AggregateSignature) -> Self {
        AggregateSymbol {
            id: SymbolId::new(),
            name: name.into(),
            signature,
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &AggregateSignature {
        &self.signature
    }

    /// The result type for an argument of type `argument`, or `None` if the
    /// aggregate does not accept it.
    pub fn return_type(&self, argument: &Ty) -> Option<Ty> {
        match &self.signature {
            AggregateSignature::Any { return_type } => Some(return_type.clone()),
            AggregateSignature::Numeric if argument.is_unknown() => Some(Ty::Unknown),
            AggregateSignature::Numeric => argument.is_numeric().then(|| argument.clone()),
            AggregateSignature::SameAsArgument => Some(argument.clone()),
            AggregateSignature::Fixed {
                parameter,
                return_type,
            } => crate::Conversion::classify(argument, parameter)
                .is_implicit()
                .then(|| return_type.clone()),
        }
    }

    /// The type the aggregate would produce when its argument type is not yet known.
    pub fn declared_return_type(&self) -> Ty {
        match &self.signature {
            AggregateSignature::Any { return_type } | AggregateSignature::Fixed { return_type, .. } => {
                return_type.clone()
            }
            AggregateSignature::Numeric | AggregateSignature::SameAsArgument => Ty::Unknown,
        }
    }

    pub fn count() -> Self {
        AggregateSymbol::new("COUNT", AggregateSignature::Any { return_type: Ty::Int32 })
    }

    pub fn sum() -> Self {
        AggregateSymbol::new("SUM", AggregateSignature::Numeric)
    }

    pub fn avg() -> Self {
        AggregateSymbol::new("AVG", AggregateSignature::Numeric)
    }

    pub fn min() -> Self {
        AggregateSymbol::new("MIN", AggregateSignature::SameAsArgument)
    }

    pub fn max() -> Self {
        AggregateSymbol::new("MAX", AggregateSignature::SameAsArgument)
    }
}
