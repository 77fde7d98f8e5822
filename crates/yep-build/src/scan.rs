use crate::{
    ThisError,
    signature::{MethodAstData, MethodAstMap, MethodRef},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use syn::{Attribute, Expr, FnArg, Item, Lit, Meta, Pat};

///
/// ScanError
///

#[derive(Debug, ThisError)]
pub enum ScanError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {origin}: {source}")]
    Parse { origin: String, source: syn::Error },

    #[error("{origin}: method '{method}': {message}")]
    Invalid {
        origin: String,
        method: String,
        message: String,
    },

    #[error("method '{}.{}' is implemented more than once", .key.model, .key.method)]
    Duplicate { key: MethodRef },
}

/// Recover parameter names and docs from every `#[method]` function in `source`.
pub fn scan_source(source: &str) -> Result<MethodAstMap, ScanError> {
    let mut map = MethodAstMap::new();
    scan_into(source, "<source>", &mut map)?;

    Ok(map)
}

/// Scan several files into one map; a method implemented twice is an error.
pub fn scan_files<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<MethodAstMap, ScanError> {
    let mut map = MethodAstMap::new();

    for path in paths {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        scan_into(&source, &path.display().to_string(), &mut map)?;
    }

    tracing::debug!(methods = map.len(), "scanned method sources");

    Ok(map)
}

fn scan_into(source: &str, origin: &str, map: &mut MethodAstMap) -> Result<(), ScanError> {
    let file = syn::parse_file(source).map_err(|source| ScanError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    scan_items(&file.items, origin, map)
}

fn scan_items(items: &[Item], origin: &str, map: &mut MethodAstMap) -> Result<(), ScanError> {
    for item in items {
        match item {
            Item::Fn(func) => {
                let method = func.sig.ident.to_string();
                let invalid = |message: String| ScanError::Invalid {
                    origin: origin.to_string(),
                    method: method.clone(),
                    message,
                };

                let Some(model) = method_model(&func.attrs).map_err(|e| invalid(e.to_string()))?
                else {
                    continue;
                };

                let data = MethodAstData {
                    params: param_names(&func.sig).map_err(invalid)?,
                    doc: doc_string(&func.attrs),
                };
                let key = MethodRef::new(&model, &method);

                if map.contains(&key) {
                    return Err(ScanError::Duplicate { key });
                }
                map.insert(key, data);
            }
            Item::Mod(module) => {
                if let Some((_, items)) = &module.content {
                    scan_items(items, origin, map)?;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

// method_model
// `#[method]` marks a framework method, `#[method(Model)]` a model method
fn method_model(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        let path = attr.path();
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let is_marker = match segments.as_slice() {
            [name] => name == "method",
            [krate, name] => krate == "yep" && name == "method",
            _ => false,
        };
        if !is_marker {
            continue;
        }

        return match &attr.meta {
            Meta::Path(_) => Ok(Some(String::new())),
            Meta::List(_) => attr
                .parse_args::<syn::Ident>()
                .map(|ident| Some(ident.to_string())),
            Meta::NameValue(nv) => Err(syn::Error::new_spanned(
                nv,
                "expected #[method] or #[method(Model)]",
            )),
        };
    }

    Ok(None)
}

// param_names
// the first parameter receives the record set and is not part of the signature
fn param_names(sig: &syn::Signature) -> Result<Vec<String>, String> {
    let mut inputs = sig.inputs.iter();

    match inputs.next() {
        Some(FnArg::Typed(_)) => {}
        Some(FnArg::Receiver(_)) => return Err("methods must be free functions".to_string()),
        None => return Err("the record set parameter is missing".to_string()),
    }

    inputs
        .map(|arg| match arg {
            FnArg::Typed(pat) => match pat.pat.as_ref() {
                Pat::Ident(ident) => Ok(ident.ident.to_string()),
                _ => Err("parameters must be plain identifiers".to_string()),
            },
            FnArg::Receiver(_) => Err("unexpected receiver".to_string()),
        })
        .collect()
}

fn doc_string(attrs: &[Attribute]) -> String {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').unwrap_or(&line).trim_end().to_string())
        .collect();

    lines.join("\n").trim().to_string()
}
