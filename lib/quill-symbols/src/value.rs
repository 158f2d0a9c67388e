use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};

use crate::ty::{HostType, Ty};

/// A runtime value, as held by a variable.
#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    /// A fixed-point number: `mantissa * 10^-scale`.
    Decimal { mantissa: i128, scale: u32 },
    String(Arc<str>),
    Char(char),
    DateTime(NaiveDateTime),
    TimeSpan(TimeDelta),
    /// An opaque value of a host type.
    Host {
        ty: HostType,
        value: Arc<dyn Any + Send + Sync>,
    },
}

impl Value {
    pub fn host<T: Any + Send + Sync>(ty: HostType, value: T) -> Self {
        Value::Host {
            ty,
            value: Arc::new(value),
        }
    }

    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Value::String(value.into())
    }

    /// The runtime type of this value.
    pub fn ty(&self) -> Ty {
        match self {
            Value::Null => Ty::Null,
            Value::Boolean(_) => Ty::Boolean,
            Value::Int8(_) => Ty::Int8,
            Value::Int16(_) => Ty::Int16,
            Value::Int32(_) => Ty::Int32,
            Value::Int64(_) => Ty::Int64,
            Value::Float32(_) => Ty::Float32,
            Value::Float64(_) => Ty::Float64,
            Value::Decimal { .. } => Ty::Decimal,
            Value::String(_) => Ty::String,
            Value::Char(_) => Ty::Char,
            Value::DateTime(_) => Ty::DateTime,
            Value::TimeSpan(_) => Ty::TimeSpan,
            Value::Host { ty, .. } => Ty::Host(ty.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Downcasts a host value.
    pub fn downcast_host<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Host { value, .. } => value.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Decimal { mantissa, scale } => fmt_decimal(f, *mantissa, *scale),
            Value::String(v) => f.write_str(v),
            Value::Char(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::TimeSpan(v) => write!(f, "{v}"),
            Value::Host { ty, .. } => write!(f, "<{}>", ty.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.ty(), self)
    }
}

fn fmt_decimal(f: &mut fmt::Formatter<'_>, mantissa: i128, scale: u32) -> fmt::Result {
    if scale == 0 {
        return write!(f, "{mantissa}");
    }
    let digits = mantissa.unsigned_abs().to_string();
    let scale = scale as usize;
    let padded = format!("{digits:0>width$}", width = scale + 1);
    let (whole, fraction) = padded.split_at(padded.len() - scale);
    let sign = if mantissa < 0 { "-" } else { "" };
    write!(f, "{sign}{whole}.{fraction}")
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    char => Char,
    NaiveDateTime => DateTime,
    TimeDelta => TimeSpan,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}
