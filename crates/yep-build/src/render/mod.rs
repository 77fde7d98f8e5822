mod data;
mod methods;
mod set;

use crate::{GenerateError, HEADER, config::GenerateConfig, unit::GenerationUnit};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::parse_str;

/// Render one unit as a formatted Rust source file.
pub fn render_unit(unit: &GenerationUnit, config: &GenerateConfig) -> Result<String, GenerateError> {
    let rt = ident(unit, "runtime_path", config.runtime_alias())?;
    let tokens = unit_tokens(unit, &rt)?;

    format(&unit.name, tokens)
}

/// Render the `mod.rs` declaring and re-exporting every unit.
pub fn render_mod(units: &[GenerationUnit]) -> Result<String, GenerateError> {
    let mut modules = quote!();
    for unit in units {
        let module = module_ident(unit)?;
        modules.extend(quote! {
            mod #module;
            pub use #module::*;
        });
    }

    format("mod", modules)
}

fn unit_tokens(unit: &GenerationUnit, rt: &Ident) -> Result<TokenStream, GenerateError> {
    // sibling models are reached through the re-exports of mod.rs
    let mut imports = quote!(use super::*;);
    for dep in &unit.deps {
        let path: syn::Path = parse_str(dep).map_err(|source| GenerateError::Render {
            model: unit.name.clone(),
            source,
        })?;
        imports.extend(quote!(use #path;));
    }

    let data = data::generate(unit, rt)?;
    let set = set::generate(unit, rt)?;
    let members = methods::generate(unit, rt)?;

    Ok(quote! {
        #![allow(
            non_snake_case,
            non_upper_case_globals,
            unused_imports,
            clippy::all,
            clippy::pedantic,
            clippy::nursery
        )]

        #imports

        #data
        #set
        #members
    })
}

fn format(model: &str, tokens: TokenStream) -> Result<String, GenerateError> {
    let file = syn::parse2::<syn::File>(tokens).map_err(|source| GenerateError::Render {
        model: model.to_string(),
        source,
    })?;

    Ok(format!("{HEADER}\n{}", prettyplease::unparse(&file)))
}

// module_ident
// lower-cased names may collide with keywords; those are emitted raw
fn module_ident(unit: &GenerationUnit) -> Result<Ident, GenerateError> {
    let name = unit.module_name();

    if parse_str::<Ident>(&name).is_ok() {
        return Ok(Ident::new(&name, Span::call_site()));
    }
    if matches!(name.as_str(), "self" | "super" | "crate" | "_") {
        return Err(GenerateError::InvalidModuleName {
            model: unit.name.clone(),
            module: name,
        });
    }

    Ok(Ident::new_raw(&name, Span::call_site()))
}

// ident
// units may be built by hand, so every name is parsed again here
pub(crate) fn ident(unit: &GenerationUnit, member: &str, name: &str) -> Result<Ident, GenerateError> {
    parse_str(name).map_err(|_| GenerateError::InvalidName {
        model: unit.name.clone(),
        member: member.to_string(),
        name: name.to_string(),
    })
}

pub(crate) fn ty(unit: &GenerationUnit, member: &str, name: &str) -> Result<syn::Type, GenerateError> {
    parse_str(name).map_err(|_| GenerateError::UnresolvableType {
        model: unit.name.clone(),
        member: member.to_string(),
        ty: name.to_string(),
    })
}

pub(crate) fn doc_attrs(doc: &str) -> TokenStream {
    let lines = doc.lines().map(|line| format!(" {line}"));

    quote!(#(#[doc = #lines])*)
}
