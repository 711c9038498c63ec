//! Formatting pass over generated code.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use eyre::{Context, Result, bail, eyre};

/// Pipe `source` through `rustfmt` and return the formatted text.
pub(crate) fn rustfmt(source: &str) -> Result<String> {
    let mut child = Command::new("rustfmt")
        .args(["--edition", "2024", "--emit", "stdout", "--quiet"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .wrap_err("Failed to run rustfmt (is it installed?)")?;

    // rustfmt reads all of stdin before writing, and needs it closed to start.
    child
        .stdin
        .take()
        .ok_or_else(|| eyre!("rustfmt stdin is not available"))?
        .write_all(source.as_bytes())
        .wrap_err("Failed to send code to rustfmt")?;

    let output = child
        .wait_with_output()
        .wrap_err("Failed to wait for rustfmt")?;
    if !output.status.success() {
        bail!(
            "rustfmt failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    String::from_utf8(output.stdout).wrap_err("rustfmt produced invalid UTF-8")
}
