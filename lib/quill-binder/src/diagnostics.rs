//! Semantic errors found while binding.
//!
//! Each error is a small struct describing one failure. Errors convert into
//! a [`Diagnostic`], which is plain data (category, span, message) and can be
//! rendered through [`IntoDiagnostic`].

use std::fmt;

use quill_reporting::{IntoDiagnostic, Label};
use quill_span::Span;
use quill_symbols::Ty;

/// The category of a semantic diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticId {
    UnresolvedName,
    TypeMismatch,
    AmbiguousOverload,
    AmbiguousReference,
    StructuralShapeMismatch,
}

impl DiagnosticId {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticId::UnresolvedName => "Q0001",
            DiagnosticId::TypeMismatch => "Q0002",
            DiagnosticId::AmbiguousOverload => "Q0003",
            DiagnosticId::AmbiguousReference => "Q0004",
            DiagnosticId::StructuralShapeMismatch => "Q0005",
        }
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticId::UnresolvedName => "unresolved name",
            DiagnosticId::TypeMismatch => "type mismatch",
            DiagnosticId::AmbiguousOverload => "ambiguous overload",
            DiagnosticId::AmbiguousReference => "ambiguous reference",
            DiagnosticId::StructuralShapeMismatch => "shape mismatch",
        };
        f.write_str(name)
    }
}

/// A recorded semantic error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub span: Span,
    pub message: String,
    /// Text attached to the primary label when rendered.
    pub label: String,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(id: DiagnosticId, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            id,
            span,
            message: message.into(),
            label: String::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}: {}: {}",
            self.span.start, self.span.end, self.id, self.message
        )
    }
}

impl IntoDiagnostic for Diagnostic {
    fn into_diagnostic(&self, file_id: usize) -> quill_reporting::Diagnostic<usize> {
        let mut label = Label::primary(file_id, self.span.clone());
        if !self.label.is_empty() {
            label = label.with_message(&self.label);
        }

        quill_reporting::Diagnostic::error()
            .with_message(&self.message)
            .with_code(self.id.code())
            .with_labels(vec![label])
            .with_notes(self.notes.clone())
    }
}

/// What kind of name failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Column,
    Table,
    TableOrColumn,
    Variable,
    Function,
    Aggregate,
    Method,
    Property,
    Type,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NameKind::Column => "column",
            NameKind::Table => "table",
            NameKind::TableOrColumn => "table or column",
            NameKind::Variable => "variable",
            NameKind::Function => "function",
            NameKind::Aggregate => "aggregate",
            NameKind::Method => "method",
            NameKind::Property => "property",
            NameKind::Type => "type",
        };
        f.write_str(text)
    }
}

fn format_types(types: &[Ty]) -> String {
    types
        .iter()
        .map(|ty| ty.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ===== Unresolved names =====

/// Error when a name does not refer to anything visible
pub struct UnresolvedNameError {
    pub span: Span,
    pub name: String,
    pub kind: NameKind,
}

impl From<UnresolvedNameError> for Diagnostic {
    fn from(error: UnresolvedNameError) -> Self {
        Diagnostic::new(
            DiagnosticId::UnresolvedName,
            error.span,
            format!("{} '{}' does not exist", error.kind, error.name),
        )
        .with_label(format!("unknown {}", error.kind))
    }
}

/// Error when a column is not part of the qualifying table instance
pub struct UnresolvedColumnOfTableError {
    pub span: Span,
    pub column: String,
    pub table: String,
}

impl From<UnresolvedColumnOfTableError> for Diagnostic {
    fn from(error: UnresolvedColumnOfTableError) -> Self {
        Diagnostic::new(
            DiagnosticId::UnresolvedName,
            error.span,
            format!("table '{}' has no column '{}'", error.table, error.column),
        )
        .with_label("unknown column")
    }
}

/// Error when a type has no member of the given name
pub struct UnresolvedMemberError {
    pub span: Span,
    pub name: String,
    pub kind: NameKind,
    pub ty: Ty,
}

impl From<UnresolvedMemberError> for Diagnostic {
    fn from(error: UnresolvedMemberError) -> Self {
        Diagnostic::new(
            DiagnosticId::UnresolvedName,
            error.span,
            format!("type {} has no {} '{}'", error.ty, error.kind, error.name),
        )
        .with_label(format!("unknown {}", error.kind))
    }
}

// ===== Type mismatches =====

/// Error when CAST has no conversion between the two types
pub struct InvalidCastError {
    pub span: Span,
    pub from: Ty,
    pub to: Ty,
}

impl From<InvalidCastError> for Diagnostic {
    fn from(error: InvalidCastError) -> Self {
        Diagnostic::new(
            DiagnosticId::TypeMismatch,
            error.span,
            format!("cannot cast {} to {}", error.from, error.to),
        )
        .with_label("no conversion exists")
    }
}

/// Error when an operator is applied to operands it is not defined for
pub struct OperatorTypeMismatchError {
    pub span: Span,
    pub operator: &'static str,
    pub operand_types: Vec<Ty>,
}

impl From<OperatorTypeMismatchError> for Diagnostic {
    fn from(error: OperatorTypeMismatchError) -> Self {
        Diagnostic::new(
            DiagnosticId::TypeMismatch,
            error.span,
            format!(
                "operator '{}' cannot be applied to operands of type ({})",
                error.operator,
                format_types(&error.operand_types)
            ),
        )
    }
}

/// Error when a condition is not boolean
pub struct ConditionNotBooleanError {
    pub span: Span,
    pub clause: &'static str,
    pub found: Ty,
}

impl From<ConditionNotBooleanError> for Diagnostic {
    fn from(error: ConditionNotBooleanError) -> Self {
        Diagnostic::new(
            DiagnosticId::TypeMismatch,
            error.span,
            format!("{} condition must be BOOLEAN, found {}", error.clause, error.found),
        )
        .with_label("expected BOOLEAN")
    }
}

/// Error when two values that must share a type do not
pub struct IncompatibleTypesError {
    pub span: Span,
    pub context: &'static str,
    pub left: Ty,
    pub right: Ty,
}

impl From<IncompatibleTypesError> for Diagnostic {
    fn from(error: IncompatibleTypesError) -> Self {
        Diagnostic::new(
            DiagnosticId::TypeMismatch,
            error.span,
            format!(
                "{} has incompatible types {} and {}",
                error.context, error.left, error.right
            ),
        )
    }
}

/// Error when no overload of a callable accepts the arguments
pub struct NoMatchingOverloadError {
    pub span: Span,
    pub kind: NameKind,
    pub name: String,
    pub argument_types: Vec<Ty>,
}

impl From<NoMatchingOverloadError> for Diagnostic {
    fn from(error: NoMatchingOverloadError) -> Self {
        Diagnostic::new(
            DiagnosticId::TypeMismatch,
            error.span,
            format!(
                "no overload of {} '{}' accepts arguments ({})",
                error.kind,
                error.name,
                format_types(&error.argument_types)
            ),
        )
        .with_label("no matching overload")
    }
}

/// Error when a literal cannot be represented
pub struct InvalidLiteralError {
    pub span: Span,
    pub text: String,
    pub expected: &'static str,
}

impl From<InvalidLiteralError> for Diagnostic {
    fn from(error: InvalidLiteralError) -> Self {
        Diagnostic::new(
            DiagnosticId::TypeMismatch,
            error.span,
            format!("'{}' is not a valid {}", error.text, error.expected),
        )
    }
}

// ===== Ambiguities =====

/// Error when several overloads fit equally well
pub struct AmbiguousOverloadError {
    pub span: Span,
    pub name: String,
    pub candidates: Vec<String>,
}

impl From<AmbiguousOverloadError> for Diagnostic {
    fn from(error: AmbiguousOverloadError) -> Self {
        let mut diagnostic = Diagnostic::new(
            DiagnosticId::AmbiguousOverload,
            error.span,
            format!("call to '{}' is ambiguous", error.name),
        )
        .with_label("ambiguous call");
        for candidate in error.candidates {
            diagnostic = diagnostic.with_note(format!("candidate: {candidate}"));
        }
        diagnostic
    }
}

/// Error when an unqualified name matches several symbols in the same scope
pub struct AmbiguousReferenceError {
    pub span: Span,
    pub name: String,
    pub candidates: Vec<String>,
}

impl From<AmbiguousReferenceError> for Diagnostic {
    fn from(error: AmbiguousReferenceError) -> Self {
        Diagnostic::new(
            DiagnosticId::AmbiguousReference,
            error.span,
            format!("'{}' is ambiguous", error.name),
        )
        .with_label("ambiguous reference")
        .with_note(format!("could refer to {}", error.candidates.join(", ")))
    }
}

// ===== Shapes =====

/// Where a column count was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeContext {
    ColumnNameList,
    SetOperation,
    Subselect,
}

/// Error when a query produces the wrong number of columns
pub struct ColumnCountMismatchError {
    pub span: Span,
    pub context: ShapeContext,
    pub expected: usize,
    pub found: usize,
}

impl From<ColumnCountMismatchError> for Diagnostic {
    fn from(error: ColumnCountMismatchError) -> Self {
        let message = match error.context {
            ShapeContext::ColumnNameList => format!(
                "{} column names were given but the query produces {} columns",
                error.expected, error.found
            ),
            ShapeContext::SetOperation => format!(
                "both sides of a set operation must have the same number of columns ({} and {})",
                error.expected, error.found
            ),
            ShapeContext::Subselect => format!(
                "subquery must return exactly {} column, found {}",
                error.expected, error.found
            ),
        };
        Diagnostic::new(DiagnosticId::StructuralShapeMismatch, error.span, message)
    }
}

/// Error when corresponding set operation columns have no common type
pub struct SetOperationTypeMismatchError {
    pub span: Span,
    pub ordinal: usize,
    pub left: Ty,
    pub right: Ty,
}

impl From<SetOperationTypeMismatchError> for Diagnostic {
    fn from(error: SetOperationTypeMismatchError) -> Self {
        Diagnostic::new(
            DiagnosticId::StructuralShapeMismatch,
            error.span,
            format!(
                "column {} of the set operation has incompatible types {} and {}",
                error.ordinal + 1,
                error.left,
                error.right
            ),
        )
    }
}

/// Error when ORDER BY names a column position that does not exist
pub struct OrderByOrdinalError {
    pub span: Span,
    pub ordinal: i64,
    pub column_count: usize,
}

impl From<OrderByOrdinalError> for Diagnostic {
    fn from(error: OrderByOrdinalError) -> Self {
        Diagnostic::new(
            DiagnosticId::StructuralShapeMismatch,
            error.span,
            format!(
                "ORDER BY position {} is out of range, the query has {} columns",
                error.ordinal, error.column_count
            ),
        )
    }
}
