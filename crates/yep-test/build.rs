#[allow(dead_code)]
#[path = "src/schema.rs"]
mod schema;

use std::{env::var, error::Error, path::PathBuf};
use yep::build::{config::GenerateConfig, generate, scan::scan_files};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/schema.rs");
    println!("cargo:rerun-if-changed=src/methods.rs");

    let root = PathBuf::from(var("CARGO_MANIFEST_DIR")?);

    // parameter names come from the method sources
    let ast = scan_files([root.join("src/methods.rs")])?;
    let config = GenerateConfig::default().with_output_dir(root.join("src/pool"));

    generate(&schema::declarations(), &ast, &config)?;

    Ok(())
}
