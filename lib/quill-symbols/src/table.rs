use std::sync::Arc;

use crate::{id::SymbolId, ty::Ty};

/// A column of a table shape.
///
/// Within one shape, columns are identified by their ordinal.
#[derive(Debug)]
pub struct ColumnSymbol {
    id: SymbolId,
    name: String,
    ty: Ty,
    ordinal: usize,
}

impl ColumnSymbol {
    pub fn new(name: impl Into<String>, ty: Ty, ordinal: usize) -> Self {
        ColumnSymbol {
            id: SymbolId::new(),
            name: name.into(),
            ty,
            ordinal,
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

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Builds an ordered column list, assigning ordinals by position.
pub fn columns<I, S>(columns: I) -> Vec<Arc<ColumnSymbol>>
where
    I: IntoIterator<Item = (S, Ty)>,
    S: Into<String>,
{
    columns
        .into_iter()
        .enumerate()
        .map(|(ordinal, (name, ty))| Arc::new(ColumnSymbol::new(name, ty, ordinal)))
        .collect()
}

/// A table declared in the data context.
#[derive(Debug)]
pub struct SchemaTableSymbol {
    id: SymbolId,
    name: String,
    columns: Vec<Arc<ColumnSymbol>>,
}

impl SchemaTableSymbol {
    /// Creates a table from `(name, type)` pairs.
    ///
    /// ```
    /// use quill_symbols::{SchemaTableSymbol, Ty};
    ///
    /// let orders = SchemaTableSymbol::new("Orders", [("Id", Ty::Int32), ("Total", Ty::Decimal)]);
    /// assert_eq!(orders.columns()[1].name(), "Total");
    /// assert_eq!(orders.columns()[1].ordinal(), 1);
    /// ```
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Ty)>,
        S: Into<String>,
    {
        SchemaTableSymbol {
            id: SymbolId::new(),
            name: name.into(),
            columns: self::columns(columns),
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Arc<ColumnSymbol>] {
        &self.columns
    }
}
