mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The information of the error is customized using the `error` attribute:
/// ```
/// use forge_attrs::ErrorKind;
/// use forge_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                   |
/// | --------- | ----------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error, and by its `Display` impl.     |
/// | `labels`  | An array of label texts, one for each span of the error, in order.            |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it.  |
///
/// Each tag accepts an expression. The expressions are evaluated inside methods taking `&self`,
/// so fields can be referenced as `self.field`.
///
/// Labels are matched with the error's spans positionally. Extra labels (or extra spans) are
/// ignored, which lets the same kind be reported with no source region at all.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    quote! {
        impl #impl_generics ErrorKind for #name #ty_generics #where_clause {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            #target
        }
    }.into()
}
