use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use typedwire_request::{MANIFEST_FILE, Manifest};

use super::{UnwrapOrExit, bake::defaults};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the manifest
    #[arg(short, long, default_value = MANIFEST_FILE)]
    pub config: PathBuf,

    /// Module used when the manifest names none
    #[arg(short, long, env = "CARGO_PKG_NAME")]
    pub package: Option<String>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let planned = manifest
            .plan(&defaults(self.package.as_deref()))
            .unwrap_or_exit();

        let module = planned
            .first()
            .map(|p| p.request.module().to_string())
            .or_else(|| manifest.module.clone())
            .or_else(|| self.package.clone())
            .unwrap_or_else(|| "(none)".to_string());

        let report = ops::check(&planned, &module, manifest.hoist_imports, &self.config)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
