//! Classification of conversions between value types.
//!
//! The classifier is a pure function of its two arguments. It drives CAST
//! validation, overload resolution and variable assignment.

use crate::ty::Ty;

/// How a value of one type can become a value of another.
///
/// Variants are ordered from best to worst, so `a < b` means `a` is the
/// better conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Conversion {
    Identity,
    Implicit,
    Explicit,
    None,
}

impl Conversion {
    /// Classifies the conversion from `source` to `target`.
    ///
    /// `Ty::Unknown` converts implicitly in both directions so that an
    /// expression that already failed to bind does not produce follow-up
    /// errors.
    pub fn classify(source: &Ty, target: &Ty) -> Conversion {
        if source == target {
            return Conversion::Identity;
        }

        if source.is_unknown() || target.is_unknown() {
            return Conversion::Implicit;
        }

        if source.is_null() || matches!(target, Ty::Object) {
            return Conversion::Implicit;
        }

        if target.is_null() {
            return Conversion::None;
        }

        if matches!(source, Ty::Object) {
            return Conversion::Explicit;
        }

        if let (Ty::Host(from), Ty::Host(to)) = (source, target) {
            if from.derives_from(to) {
                return Conversion::Implicit;
            }
            if to.derives_from(from) {
                return Conversion::Explicit;
            }
            return Conversion::None;
        }

        classify_primitive(source, target)
    }

    /// Returns true unless the conversion is `None`.
    pub fn exists(self) -> bool {
        self != Conversion::None
    }

    pub fn is_identity(self) -> bool {
        self == Conversion::Identity
    }

    /// Returns true for conversions that happen without a CAST.
    pub fn is_implicit(self) -> bool {
        matches!(self, Conversion::Identity | Conversion::Implicit)
    }

    pub fn is_explicit(self) -> bool {
        self == Conversion::Explicit
    }
}

/// Width of integral types, with CHAR sitting beside SMALLINT.
fn integral_rank(ty: &Ty) -> Option<u8> {
    match ty {
        Ty::Int8 => Some(1),
        Ty::Int16 | Ty::Char => Some(2),
        Ty::Int32 => Some(3),
        Ty::Int64 => Some(4),
        _ => None,
    }
}

fn classify_primitive(source: &Ty, target: &Ty) -> Conversion {
    match (source, target) {
        // CHAR widens to INT and beyond, but never implicitly to a narrower integer.
        (Ty::Char, _) if target.is_integer() => {
            if integral_rank(target) > Some(2) {
                Conversion::Implicit
            } else {
                Conversion::Explicit
            }
        }
        (Ty::Char, Ty::Float32 | Ty::Float64 | Ty::Decimal) => Conversion::Implicit,
        (_, Ty::Char) if source.is_integer() => Conversion::Explicit,

        (_, _) if source.is_integer() && target.is_integer() => {
            if integral_rank(source) < integral_rank(target) {
                Conversion::Implicit
            } else {
                Conversion::Explicit
            }
        }
        (_, Ty::Float32 | Ty::Float64 | Ty::Decimal) if source.is_integer() => Conversion::Implicit,

        (Ty::Float32, Ty::Float64) => Conversion::Implicit,
        (Ty::Float64, Ty::Float32) => Conversion::Explicit,
        (Ty::Float32 | Ty::Float64 | Ty::Decimal, _) if target.is_numeric() => {
            Conversion::Explicit
        }
        (Ty::Float32 | Ty::Float64 | Ty::Decimal, Ty::Char) => Conversion::Explicit,

        _ => Conversion::None,
    }
}
