use std::{env, path::PathBuf};

use eyre::Result;
use typedwire_codegen_rust::{Generator, ImportStyle};
use typedwire_core::File;
use typedwire_request::{Defaults, GenerationRequest, VariantSpec};

fn variants(tokens: &[&str]) -> Result<Vec<VariantSpec>> {
    Ok(tokens
        .iter()
        .map(|t| t.parse::<VariantSpec>())
        .collect::<typedwire_request::Result<Vec<_>>>()?)
}

fn main() -> Result<()> {
    println!("cargo::rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let defaults = Defaults::new().with_module(env::var("CARGO_PKG_NAME")?);

    let gateway = GenerationRequest::builder("Gateway")
        .defaults(defaults.clone())
        .variants(variants(&["user=crate::UserGateway", "orders=crate::OrdersGateway"])?)
        .build()?;
    let code = Generator::new(&[gateway]).render()?;
    File::new(out_dir.join("gateway_typedwire.rs"), code).write()?;

    // Included inside `mod storage`, next to its variant types.
    let storage = GenerationRequest::builder("Storage")
        .defaults(defaults)
        .tag_key("kind")
        .value_key("spec")
        .variants(variants(&["Disk", "s3=ObjectStore"])?)
        .build()?;
    let code = Generator::new(&[storage])
        .style(ImportStyle::Hoisted)
        .render()?;
    File::new(out_dir.join("storage_typedwire.rs"), code).write()?;

    Ok(())
}
