//! Source spans and spanned AST values.

use std::ops::Range;

/// Byte range into the document source.
///
/// Ordering between document elements (for example, whether an export
/// precedes a variable reference) is decided on `start`.
pub type Span = Range<usize>;

/// A value paired with the span it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Maps the inner value while preserving the span.
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            node: f(self.node),
            span: self.span,
        }
    }

    pub fn into_inner(self) -> T {
        self.node
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl<T> AsRef<T> for Spanned<T> {
    fn as_ref(&self) -> &T {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_span() {
        let name = Spanned::new("user", 8..12);
        let upper = name.map(str::to_uppercase);
        assert_eq!(upper.node, "USER");
        assert_eq!(upper.span, 8..12);
    }

    #[test]
    fn into_inner_discards_span() {
        let spanned = Spanned::new(7, 0..1);
        assert_eq!(*spanned.as_ref(), 7);
        assert_eq!(spanned.span(), &(0..1));
        assert_eq!(spanned.into_inner(), 7);
    }
}
