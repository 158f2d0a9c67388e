use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The type of a value flowing through a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Sentinel for expressions whose type could not be determined.
    Unknown,
    /// The type of the `NULL` literal.
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    String,
    Char,
    DateTime,
    TimeSpan,
    /// Top type; every value converts to it.
    Object,
    /// A value type registered by the host application.
    Host(HostType),
}

impl Ty {
    /// All primitive types, excluding the sentinels and host types.
    pub const PRIMITIVES: &'static [Ty] = &[
        Ty::Boolean,
        Ty::Int8,
        Ty::Int16,
        Ty::Int32,
        Ty::Int64,
        Ty::Float32,
        Ty::Float64,
        Ty::Decimal,
        Ty::String,
        Ty::Char,
        Ty::DateTime,
        Ty::TimeSpan,
        Ty::Object,
    ];

    pub fn is_unknown(&self) -> bool {
        matches!(self, Ty::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Ty::Null)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Ty::Int8 | Ty::Int16 | Ty::Int32 | Ty::Int64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Ty::Float32 | Ty::Float64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Ty::Decimal)
    }

    pub fn as_host(&self) -> Option<&HostType> {
        match self {
            Ty::Host(host) => Some(host),
            _ => None,
        }
    }

    /// The SQL spelling used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Ty::Unknown => "?",
            Ty::Null => "NULL",
            Ty::Boolean => "BOOLEAN",
            Ty::Int8 => "TINYINT",
            Ty::Int16 => "SMALLINT",
            Ty::Int32 => "INT",
            Ty::Int64 => "BIGINT",
            Ty::Float32 => "REAL",
            Ty::Float64 => "DOUBLE",
            Ty::Decimal => "DECIMAL",
            Ty::String => "VARCHAR",
            Ty::Char => "CHAR",
            Ty::DateTime => "DATETIME",
            Ty::TimeSpan => "TIMESPAN",
            Ty::Object => "OBJECT",
            Ty::Host(host) => host.name(),
        }
    }

    /// Maps a SQL type name, as written in `CAST(x AS name)`, to a primitive type.
    ///
    /// Host types are not known here; they are looked up in the data context.
    pub fn parse_name(name: &str) -> Option<Ty> {
        let ty = match name.to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" | "BIT" => Ty::Boolean,
            "TINYINT" | "INT8" | "BYTE" => Ty::Int8,
            "SMALLINT" | "INT16" => Ty::Int16,
            "INT" | "INTEGER" | "INT32" => Ty::Int32,
            "BIGINT" | "INT64" => Ty::Int64,
            "REAL" | "SINGLE" | "FLOAT32" => Ty::Float32,
            "FLOAT" | "DOUBLE" | "FLOAT64" => Ty::Float64,
            "DECIMAL" | "NUMERIC" | "MONEY" => Ty::Decimal,
            "VARCHAR" | "NVARCHAR" | "TEXT" | "STRING" => Ty::String,
            "CHAR" | "NCHAR" => Ty::Char,
            "DATETIME" | "DATE" | "TIMESTAMP" => Ty::DateTime,
            "TIMESPAN" | "INTERVAL" | "TIME" => Ty::TimeSpan,
            "OBJECT" => Ty::Object,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<HostType> for Ty {
    fn from(host: HostType) -> Self {
        Ty::Host(host)
    }
}

/// A value type contributed by the host application.
///
/// Host types form a single-inheritance hierarchy through their base type.
/// Two host types are equal when their names are equal.
#[derive(Clone)]
pub struct HostType(Arc<HostTypeData>);

struct HostTypeData {
    name: String,
    base: Option<HostType>,
}

impl HostType {
    pub fn new(name: impl Into<String>) -> Self {
        HostType(Arc::new(HostTypeData {
            name: name.into(),
            base: None,
        }))
    }

    pub fn with_base(name: impl Into<String>, base: HostType) -> Self {
        HostType(Arc::new(HostTypeData {
            name: name.into(),
            base: Some(base),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn base(&self) -> Option<&HostType> {
        self.0.base.as_ref()
    }

    /// Base types from the direct base upwards.
    pub fn ancestors(&self) -> impl Iterator<Item = &HostType> {
        std::iter::successors(self.base(), |host| host.base())
    }

    /// Returns true if `other` is a strict ancestor of `self`.
    pub fn derives_from(&self, other: &HostType) -> bool {
        self.ancestors().any(|ancestor| ancestor == other)
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for HostType {}

impl Hash for HostType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base() {
            Some(base) => write!(f, "HostType({} : {})", self.name(), base.name()),
            None => write!(f, "HostType({})", self.name()),
        }
    }
}
