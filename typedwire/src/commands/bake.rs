use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use typedwire_request::{Defaults, MANIFEST_FILE, Manifest};

use super::UnwrapOrExit;
use crate::{
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to the manifest
    #[arg(short, long, default_value = MANIFEST_FILE)]
    pub config: PathBuf,

    /// Directory that relative output paths are resolved against
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Module used when the manifest names none
    #[arg(short, long, env = "CARGO_PKG_NAME")]
    pub package: Option<String>,

    /// Emit `use` lines even if the manifest does not ask for them
    #[arg(long)]
    pub hoist_imports: bool,

    /// Format every file with rustfmt
    #[arg(long)]
    pub rustfmt: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let planned = manifest
            .plan(&defaults(self.package.as_deref()))
            .unwrap_or_exit();

        let report = ops::bake(
            &planned,
            BakeOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                hoist_imports: self.hoist_imports || manifest.hoist_imports,
                rustfmt: self.rustfmt,
            },
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

/// Defaults filled in from the command line and environment.
pub(super) fn defaults(package: Option<&str>) -> Defaults {
    match package {
        Some(package) => Defaults::new().with_module(package),
        None => Defaults::new(),
    }
}
