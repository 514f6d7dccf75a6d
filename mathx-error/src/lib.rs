//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs an error kind with the regions of the source that
//! caused it.

// lets the derive macro's `mathx_error::` paths resolve inside this crate's own tests
#[cfg(test)]
extern crate self as mathx_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error kind as [`Any`], so that callers can downcast it to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
///
/// Errors produced while operating on an already built expression tree (evaluation, solving)
/// have no spans; use [`Error::with_default_span`] to point them at the whole input when
/// reporting.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any region of source code.
    pub fn unspanned(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// If this error has no spans, points it at the given span instead.
    pub fn with_default_span(mut self, span: Range<usize>) -> Self {
        if self.spans.is_empty() {
            self.spans.push(span);
        }
        self
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to the given writer, with the given source code as
    /// context.
    pub fn write_report<W: io::Write>(
        &self,
        src_id: &str,
        input: &str,
        writer: W,
    ) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), writer)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

#[cfg(test)]
mod tests {
    use ariadne::Fmt;
    use mathx_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("`{}` is not defined", self.name),
        labels = ["this variable"],
        help = format!("bind it with: {} = <expression>", (&self.name).fg(EXPR)),
    )]
    struct Undefined {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to see", labels = ["first", "second"])]
    struct TwoLabels;

    #[derive(Debug, ErrorKind)]
    #[error(message = format!("expected {} arguments", expected), labels = [""])]
    struct Arity {
        expected: usize,
    }

    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.write_report("input", input, &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let err = Error::new(vec![4..5], Undefined { name: "y".to_string() });
        let out = render(&err, "3 + y");

        assert!(out.contains("`y` is not defined"), "{}", out);
        assert!(out.contains("this variable"), "{}", out);
        assert!(out.contains("bind it with: y = <expression>"), "{}", out);
    }

    #[test]
    fn report_without_spans() {
        let err = Error::unspanned(TwoLabels);
        let out = render(&err, "x");

        assert!(out.contains("nothing to see"), "{}", out);
        assert!(!out.contains("first"), "{}", out);
    }

    #[test]
    fn extra_labels_are_dropped() {
        let err = Error::new(vec![0..1], TwoLabels);
        let out = render(&err, "x + 1");

        assert!(out.contains("first"), "{}", out);
        assert!(!out.contains("second"), "{}", out);
    }

    #[test]
    fn fields_in_scope_and_unlabeled_span() {
        let err = Error::new(vec![0..3], Arity { expected: 2 });
        let out = render(&err, "f(1)");

        assert!(out.contains("expected 2 arguments"), "{}", out);
        assert!(out.contains("f(1)"), "{}", out);
    }

    #[test]
    fn default_span_only_fills_empty() {
        let err = Error::unspanned(TwoLabels).with_default_span(0..3);
        assert_eq!(err.spans, vec![0..3]);

        let err = Error::new(vec![1..2], TwoLabels).with_default_span(0..3);
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..1], Undefined { name: "x".to_string() });
        assert!(err.is::<Undefined>());
        assert!(!err.is::<TwoLabels>());
        assert_eq!(err.downcast_ref::<Undefined>().map(|k| k.name.as_str()), Some("x"));
    }
}
