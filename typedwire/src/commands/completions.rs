use clap::{Args, CommandFactory};
use eyre::{Context, Result};
use typedwire_core::OutputTarget;

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: clap_complete::Shell,

    /// Where to write the script (`stdout` or a path)
    #[arg(short, long, default_value = "stdout")]
    output: OutputTarget,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut script = Vec::new();
        clap_complete::generate(self.shell, &mut Cli::command(), "typedwire", &mut script);

        let script = String::from_utf8(script).wrap_err("Completion script is not UTF-8")?;
        self.output
            .write(&script)
            .wrap_err_with(|| format!("Failed to write completions to {}", self.output))?;
        Ok(())
    }
}
