//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`](output::Output).

mod bake;
mod check;
mod generate;
mod output;

pub use bake::{BakeReport, BakeResult, PreviewFile};
pub use check::CheckReport;
pub use generate::{EnvelopeSummary, GenerateReport};
#[cfg(test)]
pub use output::BufferedOutput;
pub use output::{Report, TerminalOutput};

/// `1 variant`, `2 variants`.
fn count(n: usize, noun: &str) -> String {
    format!("{} {}{}", n, noun, if n == 1 { "" } else { "s" })
}
