use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, Ident, ItemFn, Pat};

pub(crate) fn method(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(attr, item).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        syn::parse2::<Ident>(attr)?;
    }
    let func: ItemFn = syn::parse2(item)?;

    let mut inputs = func.sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Typed(_)) => {}
        Some(receiver @ FnArg::Receiver(_)) => {
            return Err(syn::Error::new_spanned(
                receiver,
                "methods must be free functions",
            ));
        }
        None => {
            return Err(syn::Error::new_spanned(
                &func.sig,
                "the first parameter must receive the record set",
            ));
        }
    }

    for arg in inputs {
        if let FnArg::Typed(pat) = arg
            && !matches!(pat.pat.as_ref(), Pat::Ident(_))
        {
            return Err(syn::Error::new_spanned(
                &pat.pat,
                "parameters must be plain identifiers",
            ));
        }
    }

    Ok(quote! {
        #[allow(non_snake_case)]
        #func
    })
}
