//! Text emission helpers for the typedwire generator.
//!
//! - [`builder`] - Indented text building (CodeBuilder, CodeFragment, Renderable)
//! - [`generation`] - Output bookkeeping (ImportCollector)

pub mod builder;
pub mod generation;
