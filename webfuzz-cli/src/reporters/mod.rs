//! Report renderers: human-readable console output plus JSON and HTML
//! documents for tooling and archiving.

pub mod console;
pub mod html;
pub mod json;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReporterKind {
    Console,
    Json,
    Html,
}
