use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// One `tag = expression` entry of the `error` attribute.
enum Tag {
    Message(Expr),
    Labels(Expr),
    Help(Expr),
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident = input.parse::<Ident>()?;
        input.parse::<Token![=]>()?;
        let expr = input.parse::<Expr>()?;

        match ident.to_string().as_str() {
            "message" => Ok(Self::Message(expr)),
            "labels" => Ok(Self::Labels(expr)),
            "help" => Ok(Self::Help(expr)),
            other => Err(syn::Error::new_spanned(
                &ident,
                format!("unknown tag `{}`; expected `message`, `labels` or `help`", other),
            )),
        }
    }
}

/// The contents of a report, as described by the `error` attribute.
struct ReportSpec {
    message: Expr,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ReportSpec {
    /// Reads the tags of the attribute. `message` is required, and each tag may appear once.
    fn from_attribute(attr: &Attribute) -> Result<Self> {
        let tags = attr.parse_args_with(Punctuated::<Tag, Token![,]>::parse_terminated)?;
        let (mut message, mut labels, mut help) = (None, None, None);

        for tag in tags {
            let (name, slot, expr) = match tag {
                Tag::Message(expr) => ("message", &mut message, expr),
                Tag::Labels(expr) => ("labels", &mut labels, expr),
                Tag::Help(expr) => ("help", &mut help, expr),
            };
            if slot.replace(expr).is_some() {
                return Err(syn::Error::new_spanned(attr, format!("duplicate `{}` tag", name)));
            }
        }

        let message = message.ok_or_else(|| {
            syn::Error::new_spanned(attr, "missing `message` tag in the `error` attribute")
        })?;
        Ok(Self { message, labels, help })
    }
}

/// Binds the named fields of `self` to local variables, so that tag expressions can use them
/// directly.
fn field_bindings(fields: &Fields) -> Result<TokenStream2> {
    match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            Ok(quote! {
                #[allow(unused_variables)]
                let Self { #(#names),* } = self;
            })
        },
        Fields::Unit => Ok(TokenStream2::new()),
        Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
            unnamed,
            "`ErrorKind` cannot be derived for tuple structs",
        )),
    }
}

/// A struct deriving `ErrorKind`.
pub struct ErrorKindTarget {
    name: Ident,
    bindings: TokenStream2,
    report: ReportSpec,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let item = input.parse::<ItemStruct>()?;
        let attr = item.attrs
            .iter()
            .find(|attr| attr.path().is_ident("error"))
            .ok_or_else(|| syn::Error::new_spanned(&item.ident, "missing `error` attribute"))?;

        Ok(Self {
            report: ReportSpec::from_attribute(attr)?,
            bindings: field_bindings(&item.fields)?,
            name: item.ident,
        })
    }
}

impl ErrorKindTarget {
    /// Generates the `ErrorKind` implementation.
    pub fn expand(&self) -> TokenStream2 {
        let Self { name, bindings, report } = self;
        let message = &report.message;
        let labels = match &report.labels {
            Some(labels) => quote! { (#labels) },
            None => quote! { Vec::<String>::new() },
        };
        let help = report.help.as_ref().map(|help| quote! { builder.set_help(#help); });

        quote! {
            impl mathx_error::ErrorKind for #name {
                fn as_any(&self) -> &dyn std::any::Any {
                    self
                }

                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[std::ops::Range<usize>],
                ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                    #bindings

                    let labels = #labels
                        .into_iter()
                        .zip(spans)
                        .map(|(text, span)| {
                            let text = text.to_string();
                            let label = ariadne::Label::new((src_id, span.clone()))
                                .with_color(mathx_error::EXPR);
                            if text.is_empty() {
                                label
                            } else {
                                label.with_message(text)
                            }
                        });

                    let offset = spans.first().map_or(0, |span| span.start);
                    #[allow(unused_mut)]
                    let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                        .with_message(#message)
                        .with_labels(labels);
                    #help
                    builder.finish()
                }
            }
        }
    }
}
