//! Generates the typed recordset pool from a model registry.

pub mod config;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod signature;
pub mod unit;

use crate::{
    config::{ConfigError, GenerateConfig},
    render::{render_mod, render_unit},
    scan::ScanError,
    signature::MethodAstMap,
    unit::GenerationUnit,
};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use yep_schema::registry::{Declarations, ModelRegistry};

/// First lines of every generated file.
pub const HEADER: &str = "// This file is autogenerated by yep-generate\n\
                          // DO NOT MODIFY THIS FILE - ANY CHANGES WILL BE OVERWRITTEN\n";

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] yep_schema::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

///
/// GenerateError
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error(
        "method '{model}.{method}' declares {expected} parameter(s) but {found} name(s) were recovered"
    )]
    SignatureMismatch {
        model: String,
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("type '{ty}' of '{model}.{member}' does not resolve to a Rust type")]
    UnresolvableType {
        model: String,
        member: String,
        ty: String,
    },

    #[error("'{model}.{member}' clashes with a generated method")]
    ReservedName { model: String, member: String },

    #[error("'{model}.{member}' uses '{name}', which is not a Rust identifier")]
    InvalidName {
        model: String,
        member: String,
        name: String,
    },

    #[error("'{model}.{method}' must take the record data and return the model's record set")]
    InvalidOverride { model: String, method: String },

    #[error("model '{model}' would import both '{first}' and '{second}' under one name")]
    ImportCollision {
        model: String,
        first: String,
        second: String,
    },

    #[error("model '{0}' is not registered")]
    UnknownModel(String),

    #[error("models '{first}' and '{second}' would both be written to '{file}'")]
    FileCollision {
        first: String,
        second: String,
        file: String,
    },

    #[error("model '{model}' cannot be compiled as module '{module}'")]
    InvalidModuleName { model: String, module: String },

    #[error("cannot render '{model}': {source}")]
    Render { model: String, source: syn::Error },
}

/// Bootstrap `decls` and write one pool file per model into the configured directory.
pub fn generate(
    decls: &Declarations,
    ast: &MethodAstMap,
    config: &GenerateConfig,
) -> Result<Vec<PathBuf>, Error> {
    let registry = decls.bootstrap()?;

    PoolBuilder::new(&registry, ast, config).write()
}

///
/// PoolBuilder
///

pub struct PoolBuilder<'a> {
    pub registry: &'a ModelRegistry,
    pub ast: &'a MethodAstMap,
    pub config: &'a GenerateConfig,
}

impl<'a> PoolBuilder<'a> {
    #[must_use]
    pub const fn new(
        registry: &'a ModelRegistry,
        ast: &'a MethodAstMap,
        config: &'a GenerateConfig,
    ) -> Self {
        Self {
            registry,
            ast,
            config,
        }
    }

    pub fn unit(&self, model: &str) -> Result<GenerationUnit, GenerateError> {
        let model = self
            .registry
            .get(model)
            .filter(|m| !m.is_mixin())
            .ok_or_else(|| GenerateError::UnknownModel(model.to_string()))?;

        GenerationUnit::assemble(self.registry, model, self.ast, self.config)
    }

    /// Assemble every concrete model; nothing is returned unless all of them succeed.
    pub fn units(&self) -> Result<Vec<GenerationUnit>, GenerateError> {
        let mut files: BTreeMap<String, String> = BTreeMap::new();
        let mut units = Vec::new();

        for model in self.registry.concrete_models() {
            let unit = GenerationUnit::assemble(self.registry, model, self.ast, self.config)?;

            if let Some(first) = files.insert(unit.file_name.clone(), unit.name.clone()) {
                return Err(GenerateError::FileCollision {
                    first,
                    second: unit.name,
                    file: unit.file_name,
                });
            }
            units.push(unit);
        }

        Ok(units)
    }

    pub fn render(&self, unit: &GenerationUnit) -> Result<String, GenerateError> {
        render_unit(unit, self.config)
    }

    /// Render every file in memory, then write them all to the output directory.
    pub fn write(&self) -> Result<Vec<PathBuf>, Error> {
        let units = self.units()?;

        let mut files = Vec::with_capacity(units.len() + 1);
        for unit in &units {
            files.push((unit.file_name.clone(), self.render(unit)?));
        }
        files.push(("mod.rs".to_string(), render_mod(&units)?));

        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

        let mut written = Vec::with_capacity(files.len());
        for (name, source) in files {
            let path = dir.join(name);
            fs::write(&path, source).map_err(|source| io_error(&path, source))?;

            tracing::info!(path = %path.display(), "generated pool file");
            written.push(path);
        }

        Ok(written)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
