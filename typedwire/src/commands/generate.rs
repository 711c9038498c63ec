use clap::Args;
use eyre::Result;
use typedwire_core::OutputTarget;
use typedwire_request::{Defaults, GenerationRequest, VariantSpec};

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Module named in the generated header (dashes become underscores)
    #[arg(short, long, env = "CARGO_PKG_NAME")]
    pub package: Option<String>,

    /// Name of the capability enum to generate
    #[arg(short, long)]
    pub interface: String,

    /// Name of the envelope struct (defaults to <interface>Typed)
    #[arg(short, long)]
    pub typed: Option<String>,

    /// Output file, or `stdout` (defaults to <interface>_typedwire.rs)
    #[arg(short, long)]
    pub output: Option<OutputTarget>,

    /// Path of the runtime crate used by generated code
    #[arg(long)]
    pub runtime: Option<String>,

    /// Mapping key that holds the discriminator
    #[arg(long)]
    pub tag_key: Option<String>,

    /// Mapping key that holds the value
    #[arg(long)]
    pub value_key: Option<String>,

    /// Derive on the generated types (repeatable; replaces the defaults)
    #[arg(long = "derive", value_name = "DERIVE")]
    pub derives: Vec<String>,

    /// Emit `use` lines instead of fully qualified paths
    #[arg(long)]
    pub hoist_imports: bool,

    /// Format the output with rustfmt
    #[arg(long)]
    pub rustfmt: bool,

    /// Variants as `alias=Type` or `Type`
    #[arg(value_name = "VARIANT")]
    pub variants: Vec<VariantSpec>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let request = self.request().unwrap_or_exit();
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| OutputTarget::Path(request.default_file_name().into()));

        let report = ops::generate(
            &request,
            GenerateOptions {
                output: &output,
                style: ops::import_style(self.hoist_imports),
                rustfmt: self.rustfmt,
            },
        )?;

        // The code itself went to stdout.
        if output != OutputTarget::Stdout {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }

    fn request(&self) -> typedwire_request::Result<GenerationRequest> {
        let mut defaults = Defaults::new();
        if let Some(package) = &self.package {
            defaults = defaults.with_module(package);
        }

        let mut builder = GenerationRequest::builder(self.interface.as_str())
            .defaults(defaults)
            .variants(self.variants.iter().cloned());
        if let Some(typed) = &self.typed {
            builder = builder.envelope(typed.as_str());
        }
        if let Some(runtime) = &self.runtime {
            builder = builder.runtime(runtime.as_str());
        }
        if let Some(key) = &self.tag_key {
            builder = builder.tag_key(key.as_str());
        }
        if let Some(key) = &self.value_key {
            builder = builder.value_key(key.as_str());
        }
        if !self.derives.is_empty() {
            builder = builder.derives(self.derives.iter().map(String::as_str));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use typedwire_request::Error;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        cmd: GenerateCommand,
    }

    fn parse(args: &[&str]) -> GenerateCommand {
        Harness::try_parse_from(std::iter::once("generate").chain(args.iter().copied()))
            .unwrap()
            .cmd
    }

    #[test]
    fn test_flags_build_a_request() {
        let cmd = parse(&[
            "-p",
            "my-service",
            "-i",
            "Gateway",
            "--tag-key",
            "kind",
            "--derive",
            "Debug",
            "user=UserGateway",
            "OrdersGateway",
        ]);
        let request = cmd.request().unwrap();

        assert_eq!(request.module(), "my_service");
        assert_eq!(request.envelope(), "GatewayTyped");
        assert_eq!(request.keys().tag(), "kind");
        assert_eq!(request.keys().value(), "v");
        assert_eq!(request.derives(), ["Debug"]);
        let tags: Vec<&str> = request.variants_with_tags().map(|(_, tag)| tag).collect();
        assert_eq!(tags, ["user", "ordersgateway"]);
    }

    #[test]
    fn test_stdout_sentinel() {
        let cmd = parse(&["-p", "example", "-i", "Gateway", "-o", "stdout"]);
        assert_eq!(cmd.output, Some(OutputTarget::Stdout));
    }

    #[test]
    fn test_malformed_variant_is_rejected_by_the_parser() {
        assert!(Harness::try_parse_from(["generate", "-i", "Gateway", "user="]).is_err());
    }

    #[test]
    fn test_duplicate_discriminator_is_a_configuration_error() {
        let cmd = parse(&[
            "-p",
            "example",
            "-i",
            "Gateway",
            "user=UserGateway",
            "USER=AdminGateway",
        ]);
        let err = cmd.request().unwrap_err();
        assert!(matches!(*err, Error::DuplicateDiscriminator { .. }));
    }
}
