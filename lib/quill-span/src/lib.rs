//! Source positions shared by the Quill crates.
//!
//! Offsets are byte offsets into the query text a syntax tree was built
//! from.

/// A half-open byte range in the query text.
pub type Span = std::ops::Range<usize>;

/// An identifier with its quoting removed, and the span it was written at.
pub type Name = Spanned<String>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// The text this value was read from.
    pub fn source<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.span.clone())
    }
}
