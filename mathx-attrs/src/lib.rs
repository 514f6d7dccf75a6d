mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any kind of struct with named fields or no fields.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use mathx_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of formula", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of label texts, paired in order with the spans of the error.        |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression that should evaluate to something implementing
/// [`ToString`]. For structs with named fields, the expression is evaluated with the members of
/// the struct in scope, so they can be used in the expression (tuple structs are not supported).
///
/// Labels without a matching span are dropped; an empty label string highlights its span without
/// a message. The `message` tag is required, and each tag may be given only once.
///
/// ```compile_fail
/// use mathx_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "first", message = "second")]
/// pub struct Twice;
/// ```
///
/// [`ErrorKind`]: https://docs.rs/mathx-error/latest/mathx_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    parse_macro_input!(item as ErrorKindTarget).expand().into()
}
