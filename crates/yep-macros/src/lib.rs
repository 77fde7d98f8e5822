use proc_macro::TokenStream;

mod method;

/// Marks a free function as a model method implementation.
///
/// `#[method(Model)]` implements a method of `Model`, a bare `#[method]` a
/// framework method. The first parameter receives the record set. The
/// generator reads parameter names and docs from these functions.
#[proc_macro_attribute]
pub fn method(attr: TokenStream, item: TokenStream) -> TokenStream {
    method::method(attr.into(), item.into()).into()
}
