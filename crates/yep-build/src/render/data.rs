use crate::{
    GenerateError,
    render::{ident, ty},
    unit::GenerationUnit,
};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

pub(crate) fn generate(unit: &GenerationUnit, rt: &Ident) -> Result<TokenStream, GenerateError> {
    let mut tokens = quote!();
    tokens.extend(names(unit, rt)?);
    tokens.extend(data_struct(unit, rt)?);

    Ok(tokens)
}

// -------------------------
// Field and model names
// -------------------------

fn names(unit: &GenerationUnit, rt: &Ident) -> Result<TokenStream, GenerateError> {
    let consts = unit
        .fields
        .iter()
        .map(|field| {
            let ident = field_const(unit, &field.name)?;
            let name = field.name.as_str();

            Ok(quote! {
                pub const #ident: #rt::FieldName = #rt::FieldName::new(#name);
            })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let model_ident = format_ident!("Model{}", ident(unit, &unit.name, &unit.name)?);
    let model = unit.name.as_str();

    Ok(quote! {
        #(#consts)*
        pub const #model_ident: #rt::ModelName = #rt::ModelName::new(#model);
    })
}

pub(crate) fn field_const(unit: &GenerationUnit, field: &str) -> Result<Ident, GenerateError> {
    let model = ident(unit, &unit.name, &unit.name)?;
    let field = ident(unit, field, field)?;

    Ok(format_ident!("{}_{}", model, field))
}

// -------------------------
// Data struct
// -------------------------

fn data_struct(unit: &GenerationUnit, rt: &Ident) -> Result<TokenStream, GenerateError> {
    let data = ident(unit, &unit.name, &unit.name)?;
    let doc = format!(
        " {} is an autogenerated struct type to handle {} data.",
        unit.name, unit.name
    );

    let mut idents = Vec::with_capacity(unit.fields.len());
    let mut types = Vec::with_capacity(unit.fields.len());
    let mut consts = Vec::with_capacity(unit.fields.len());
    for field in &unit.fields {
        idents.push(ident(unit, &field.name, &field.name)?);
        types.push(ty(unit, &field.name, &field.ty)?);
        consts.push(field_const(unit, &field.name)?);
    }

    Ok(quote! {
        #[doc = #doc]
        #[derive(Clone, Debug, Default)]
        pub struct #data {
            #(pub #idents: #types,)*
        }

        impl #rt::RecordData for #data {
            fn into_values(self) -> #rt::Values {
                let mut values = #rt::Values::new();
                #(values.insert(#consts, #rt::FieldValue::into_value(self.#idents));)*

                values
            }

            fn from_values(mut values: #rt::Values) -> Self {
                Self {
                    #(#idents: values.take(#consts).cast(),)*
                }
            }
        }
    })
}
