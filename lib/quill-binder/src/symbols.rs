//! Symbols produced while binding a query, and the closed [`Symbol`] union
//! over every kind of symbol.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use quill_symbols::{
    AggregateSymbol, ColumnSymbol, FunctionSymbol, MethodSymbol, ParameterSymbol, PropertySymbol,
    SchemaTableSymbol, SymbolId, Ty, VariableSymbol,
};

use crate::bound::BoundQuery;

/// Stands in for a name that failed to resolve.
#[derive(Debug)]
pub struct BadSymbol {
    id: SymbolId,
    name: String,
}

impl BadSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        BadSymbol {
            id: SymbolId::new(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Stands in for a table reference that failed to resolve. It has no columns.
#[derive(Debug)]
pub struct BadTableSymbol {
    id: SymbolId,
    name: String,
}

impl BadTableSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        BadTableSymbol {
            id: SymbolId::new(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The shape of a derived table, taken from its inner query's output.
#[derive(Debug)]
pub struct DerivedTableSymbol {
    id: SymbolId,
    name: String,
    columns: Vec<Arc<ColumnSymbol>>,
}

impl DerivedTableSymbol {
    pub fn new(name: impl Into<String>, columns: Vec<Arc<ColumnSymbol>>) -> Self {
        DerivedTableSymbol {
            id: SymbolId::new(),
            name: name.into(),
            columns,
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

/// A table defined by a `WITH name [(columns)] AS (query)` clause.
#[derive(Debug)]
pub struct CommonTableExpressionSymbol {
    id: SymbolId,
    name: String,
    columns: Vec<Arc<ColumnSymbol>>,
    query: BoundQuery,
}

impl CommonTableExpressionSymbol {
    pub fn new(name: impl Into<String>, columns: Vec<Arc<ColumnSymbol>>, query: BoundQuery) -> Self {
        CommonTableExpressionSymbol {
            id: SymbolId::new(),
            name: name.into(),
            columns,
            query,
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

    /// The query that defines the table's rows.
    pub fn query(&self) -> &BoundQuery {
        &self.query
    }
}

/// The table a [`TableInstanceSymbol`] is an occurrence of.
#[derive(Debug, Clone)]
pub enum TableRef {
    Schema(Arc<SchemaTableSymbol>),
    Derived(Arc<DerivedTableSymbol>),
    CommonTableExpression(Arc<CommonTableExpressionSymbol>),
    Bad(Arc<BadTableSymbol>),
}

impl TableRef {
    pub fn name(&self) -> &str {
        match self {
            TableRef::Schema(table) => table.name(),
            TableRef::Derived(table) => table.name(),
            TableRef::CommonTableExpression(table) => table.name(),
            TableRef::Bad(table) => table.name(),
        }
    }

    pub fn columns(&self) -> &[Arc<ColumnSymbol>] {
        match self {
            TableRef::Schema(table) => table.columns(),
            TableRef::Derived(table) => table.columns(),
            TableRef::CommonTableExpression(table) => table.columns(),
            TableRef::Bad(_) => &[],
        }
    }

    pub fn is_bad(&self) -> bool {
        matches!(self, TableRef::Bad(_))
    }

    pub fn to_symbol(&self) -> Symbol {
        match self {
            TableRef::Schema(table) => Symbol::SchemaTable(table.clone()),
            TableRef::Derived(table) => Symbol::DerivedTable(table.clone()),
            TableRef::CommonTableExpression(table) => Symbol::CommonTableExpression(table.clone()),
            TableRef::Bad(table) => Symbol::BadTable(table.clone()),
        }
    }
}

/// A register holding one value of the current row during evaluation.
///
/// Slots compare by identity.
#[derive(Clone)]
pub struct ValueSlot(Arc<ValueSlotData>);

struct ValueSlotData {
    id: SymbolId,
    name: String,
    ty: Ty,
}

impl ValueSlot {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        ValueSlot(Arc::new(ValueSlotData {
            id: SymbolId::new(),
            name: name.into(),
            ty,
        }))
    }

    pub fn id(&self) -> SymbolId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn ty(&self) -> &Ty {
        &self.0.ty
    }
}

impl PartialEq for ValueSlot {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ValueSlot {}

impl fmt::Debug for ValueSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueSlot({} {}: {})", self.0.id, self.0.name, self.0.ty)
    }
}

/// One occurrence of a table in a FROM clause.
///
/// Every occurrence gets its own column instances, so a self-join yields two
/// instances whose columns are distinct symbols.
#[derive(Debug)]
pub struct TableInstanceSymbol {
    id: SymbolId,
    name: String,
    table: TableRef,
    columns: Vec<Arc<TableColumnInstanceSymbol>>,
}

impl TableInstanceSymbol {
    /// Creates an instance named `name` (the alias, or the table name when
    /// there is none) together with one column instance per table column.
    pub fn new(name: impl Into<String>, table: TableRef) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|instance| {
            let columns = table
                .columns()
                .iter()
                .map(|column| {
                    Arc::new(TableColumnInstanceSymbol {
                        id: SymbolId::new(),
                        instance: instance.clone(),
                        column: column.clone(),
                        value_slot: ValueSlot::new(
                            format!("{}.{}", name, column.name()),
                            column.ty().clone(),
                        ),
                    })
                })
                .collect();

            TableInstanceSymbol {
                id: SymbolId::new(),
                name,
                table,
                columns,
            }
        })
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn columns(&self) -> &[Arc<TableColumnInstanceSymbol>] {
        &self.columns
    }
}

/// A column of a specific table instance.
#[derive(Debug)]
pub struct TableColumnInstanceSymbol {
    id: SymbolId,
    instance: Weak<TableInstanceSymbol>,
    column: Arc<ColumnSymbol>,
    value_slot: ValueSlot,
}

impl TableColumnInstanceSymbol {
    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.column.name()
    }

    pub fn ty(&self) -> &Ty {
        self.column.ty()
    }

    pub fn column(&self) -> &Arc<ColumnSymbol> {
        &self.column
    }

    /// The instance this column belongs to, while it is alive.
    pub fn table_instance(&self) -> Option<Arc<TableInstanceSymbol>> {
        self.instance.upgrade()
    }

    pub fn value_slot(&self) -> &ValueSlot {
        &self.value_slot
    }
}

/// A column produced by a select list or a set operation.
#[derive(Debug)]
pub struct QueryColumnInstanceSymbol {
    id: SymbolId,
    name: String,
    value_slot: ValueSlot,
}

impl QueryColumnInstanceSymbol {
    pub fn new(name: impl Into<String>, value_slot: ValueSlot) -> Self {
        QueryColumnInstanceSymbol {
            id: SymbolId::new(),
            name: name.into(),
            value_slot,
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Ty {
        self.value_slot.ty()
    }

    pub fn value_slot(&self) -> &ValueSlot {
        &self.value_slot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    BadSymbol,
    BadTable,
    Column,
    SchemaTable,
    DerivedTable,
    TableInstance,
    TableColumnInstance,
    QueryColumnInstance,
    CommonTableExpression,
    Variable,
    Parameter,
    Function,
    Aggregate,
    Method,
    Property,
}

impl SymbolKind {
    pub fn is_bad(self) -> bool {
        matches!(self, SymbolKind::BadSymbol | SymbolKind::BadTable)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SymbolKind::BadSymbol => "unresolved symbol",
            SymbolKind::BadTable => "unresolved table",
            SymbolKind::Column => "column",
            SymbolKind::SchemaTable => "table",
            SymbolKind::DerivedTable => "derived table",
            SymbolKind::TableInstance => "table instance",
            SymbolKind::TableColumnInstance => "column",
            SymbolKind::QueryColumnInstance => "query column",
            SymbolKind::CommonTableExpression => "common table expression",
            SymbolKind::Variable => "variable",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Function => "function",
            SymbolKind::Aggregate => "aggregate",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
        };
        f.write_str(text)
    }
}

/// Any symbol. Two symbols are equal when they are the same symbol.
#[derive(Clone)]
pub enum Symbol {
    Bad(Arc<BadSymbol>),
    BadTable(Arc<BadTableSymbol>),
    Column(Arc<ColumnSymbol>),
    SchemaTable(Arc<SchemaTableSymbol>),
    DerivedTable(Arc<DerivedTableSymbol>),
    TableInstance(Arc<TableInstanceSymbol>),
    TableColumnInstance(Arc<TableColumnInstanceSymbol>),
    QueryColumnInstance(Arc<QueryColumnInstanceSymbol>),
    CommonTableExpression(Arc<CommonTableExpressionSymbol>),
    Variable(Arc<VariableSymbol>),
    Parameter(Arc<ParameterSymbol>),
    Function(Arc<FunctionSymbol>),
    Aggregate(Arc<AggregateSymbol>),
    Method(Arc<MethodSymbol>),
    Property(Arc<PropertySymbol>),
}

impl Symbol {
    pub fn bad(name: impl Into<String>) -> Symbol {
        Symbol::Bad(Arc::new(BadSymbol::new(name)))
    }

    pub fn id(&self) -> SymbolId {
        match self {
            Symbol::Bad(s) => s.id(),
            Symbol::BadTable(s) => s.id(),
            Symbol::Column(s) => s.id(),
            Symbol::SchemaTable(s) => s.id(),
            Symbol::DerivedTable(s) => s.id(),
            Symbol::TableInstance(s) => s.id(),
            Symbol::TableColumnInstance(s) => s.id(),
            Symbol::QueryColumnInstance(s) => s.id(),
            Symbol::CommonTableExpression(s) => s.id(),
            Symbol::Variable(s) => s.id(),
            Symbol::Parameter(s) => s.id(),
            Symbol::Function(s) => s.id(),
            Symbol::Aggregate(s) => s.id(),
            Symbol::Method(s) => s.id(),
            Symbol::Property(s) => s.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Bad(s) => s.name(),
            Symbol::BadTable(s) => s.name(),
            Symbol::Column(s) => s.name(),
            Symbol::SchemaTable(s) => s.name(),
            Symbol::DerivedTable(s) => s.name(),
            Symbol::TableInstance(s) => s.name(),
            Symbol::TableColumnInstance(s) => s.name(),
            Symbol::QueryColumnInstance(s) => s.name(),
            Symbol::CommonTableExpression(s) => s.name(),
            Symbol::Variable(s) => s.name(),
            Symbol::Parameter(s) => s.name(),
            Symbol::Function(s) => s.name(),
            Symbol::Aggregate(s) => s.name(),
            Symbol::Method(s) => s.name(),
            Symbol::Property(s) => s.name(),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Bad(_) => SymbolKind::BadSymbol,
            Symbol::BadTable(_) => SymbolKind::BadTable,
            Symbol::Column(_) => SymbolKind::Column,
            Symbol::SchemaTable(_) => SymbolKind::SchemaTable,
            Symbol::DerivedTable(_) => SymbolKind::DerivedTable,
            Symbol::TableInstance(_) => SymbolKind::TableInstance,
            Symbol::TableColumnInstance(_) => SymbolKind::TableColumnInstance,
            Symbol::QueryColumnInstance(_) => SymbolKind::QueryColumnInstance,
            Symbol::CommonTableExpression(_) => SymbolKind::CommonTableExpression,
            Symbol::Variable(_) => SymbolKind::Variable,
            Symbol::Parameter(_) => SymbolKind::Parameter,
            Symbol::Function(_) => SymbolKind::Function,
            Symbol::Aggregate(_) => SymbolKind::Aggregate,
            Symbol::Method(_) => SymbolKind::Method,
            Symbol::Property(_) => SymbolKind::Property,
        }
    }

    /// The type of the value the symbol denotes.
    ///
    /// Bad symbols are `UNKNOWN`. Tables and table instances denote rows,
    /// which are opaque `OBJECT` values. Functions, aggregates and methods
    /// report their return type.
    pub fn ty(&self) -> Ty {
        match self {
            Symbol::Bad(_) | Symbol::BadTable(_) => Ty::Unknown,
            Symbol::SchemaTable(_)
            | Symbol::DerivedTable(_)
            | Symbol::TableInstance(_)
            | Symbol::CommonTableExpression(_) => Ty::Object,
            Symbol::Column(s) => s.ty().clone(),
            Symbol::TableColumnInstance(s) => s.ty().clone(),
            Symbol::QueryColumnInstance(s) => s.ty().clone(),
            Symbol::Variable(s) => s.ty().clone(),
            Symbol::Parameter(s) => s.ty().clone(),
            Symbol::Function(s) => s.return_type().clone(),
            Symbol::Aggregate(s) => s.declared_return_type(),
            Symbol::Method(s) => s.return_type().clone(),
            Symbol::Property(s) => s.ty().clone(),
        }
    }

    pub fn is_bad(&self) -> bool {
        self.kind().is_bad()
    }

    pub fn as_table_instance(&self) -> Option<&Arc<TableInstanceSymbol>> {
        match self {
            Symbol::TableInstance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_table_column_instance(&self) -> Option<&Arc<TableColumnInstanceSymbol>> {
        match self {
            Symbol::TableColumnInstance(column) => Some(column),
            _ => None,
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({} {})", self.kind(), self.id(), self.name())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.name())
    }
}

macro_rules! symbol_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Arc<$ty>> for Symbol {
                fn from(symbol: Arc<$ty>) -> Self {
                    Symbol::$variant(symbol)
                }
            }
        )*
    };
}

symbol_from! {
    BadSymbol => Bad,
    BadTableSymbol => BadTable,
    ColumnSymbol => Column,
    SchemaTableSymbol => SchemaTable,
    DerivedTableSymbol => DerivedTable,
    TableInstanceSymbol => TableInstance,
    TableColumnInstanceSymbol => TableColumnInstance,
    QueryColumnInstanceSymbol => QueryColumnInstance,
    CommonTableExpressionSymbol => CommonTableExpression,
    VariableSymbol => Variable,
    ParameterSymbol => Parameter,
    FunctionSymbol => Function,
    AggregateSymbol => Aggregate,
    MethodSymbol => Method,
    PropertySymbol => Property,
}
