//! Generates the fixture's mappers into `OUT_DIR`.

use camino::Utf8PathBuf;
use fieldmap_gen::{GenerateOptions, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = Utf8PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = Utf8PathBuf::from(std::env::var("OUT_DIR")?);
    let options = GenerateOptions::new(manifest_dir.join("mappers.yml"))
        .with_output(out_dir.join("mappers_gen.rs"));
    run(&options)?;

    println!("cargo:rerun-if-changed=mappers.yml");
    println!("cargo:rerun-if-changed=src/dto.rs");
    println!("cargo:rerun-if-changed=src/models");
    Ok(())
}
