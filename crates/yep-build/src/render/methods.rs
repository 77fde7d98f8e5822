use crate::{
    GenerateError,
    render::{data::field_const, doc_attrs, ident, ty},
    unit::{FieldUnit, GenerationUnit, MethodUnit},
};
use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};

pub(crate) fn generate(unit: &GenerationUnit, rt: &Ident) -> Result<TokenStream, GenerateError> {
    let set = format_ident!("{}Set", ident(unit, &unit.name, &unit.name)?);
    let accessors = unit
        .fields
        .iter()
        .map(|field| accessors(unit, field, rt))
        .collect::<Result<Vec<_>, _>>()?;
    let methods = unit
        .methods
        .iter()
        .map(|method| method_wrapper(unit, method, rt))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        impl #set {
            #(#accessors)*
            #(#methods)*
        }
    })
}

// -------------------------
// Getters and setters
// -------------------------

fn accessors(
    unit: &GenerationUnit,
    field: &FieldUnit,
    rt: &Ident,
) -> Result<TokenStream, GenerateError> {
    let getter = ident(unit, &field.name, &field.name)?;
    let setter = format_ident!("Set{}", getter);
    let name = field_const(unit, &field.name)?;
    let field_ty = ty(unit, &field.name, &field.ty)?;

    let get_doc = format!(" Gets the value of the {} field of the first record.", field.name);
    let set_doc = format!(" Sets the value of the {} field on every record.", field.name);

    let (get_body, set_value) = if field.is_record_set {
        (
            quote!(<#field_ty as #rt::RecordSet>::from_collection(self.collection.get(#name).cast())),
            quote!(#rt::Value::Collection(#rt::RecordSet::into_collection(value))),
        )
    } else {
        (
            quote!(self.collection.get(#name).cast()),
            quote!(#rt::FieldValue::into_value(value)),
        )
    };

    let setter = if field.readonly {
        quote!()
    } else {
        quote! {
            #[doc = #set_doc]
            pub fn #setter(&self, value: #field_ty) {
                self.collection.set(#name, #set_value);
            }
        }
    };

    Ok(quote! {
        #[doc = #get_doc]
        pub fn #getter(&self) -> #field_ty {
            #get_body
        }

        #setter
    })
}

// -------------------------
// Method wrappers
// -------------------------

fn method_wrapper(
    unit: &GenerationUnit,
    method: &MethodUnit,
    rt: &Ident,
) -> Result<TokenStream, GenerateError> {
    let method_ident = ident(unit, &method.name, &method.name)?;
    let name = method.name.as_str();
    let docs = doc_attrs(&method.doc);

    let mut params = Vec::with_capacity(method.params.len());
    let mut args = Vec::with_capacity(method.params.len());
    for p in &method.params {
        let pname = ident(unit, &method.name, &p.name)?;
        let pty = ty(unit, &method.name, &p.ty)?;

        args.push(if p.is_record_set {
            quote!(#rt::Value::Collection(#rt::RecordSet::into_collection(#pname)))
        } else {
            quote!(#rt::FieldValue::into_value(#pname))
        });
        params.push(quote!(#pname: #pty));
    }

    let count = Literal::usize_unsuffixed(method.params.len());
    let call = quote!(self.collection.call(#name, args));

    Ok(match &method.returns {
        None => quote! {
            #docs
            pub fn #method_ident(&self, #(#params),*) {
                let args: [#rt::Value; #count] = [#(#args),*];
                #call;
            }
        },
        Some(ret) if ret.is_record_set => {
            let ret_ty = ty(unit, &method.name, &ret.ty)?;

            quote! {
                #docs
                pub fn #method_ident(&self, #(#params),*) -> #ret_ty {
                    let args: [#rt::Value; #count] = [#(#args),*];
                    <#ret_ty as #rt::RecordSet>::from_collection(#call.cast())
                }
            }
        }
        Some(ret) => {
            let ret_ty = ty(unit, &method.name, &ret.ty)?;

            quote! {
                #docs
                pub fn #method_ident(&self, #(#params),*) -> #ret_ty {
                    let args: [#rt::Value; #count] = [#(#args),*];
                    #call.cast()
                }
            }
        }
    })
}
