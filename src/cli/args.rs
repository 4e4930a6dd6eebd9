//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use denshoch::config::{AltOp, ClassOp, Recipe, RemoveOp, RubyOp};

/// Add classes, alt text and ruby annotations to HTML/XHTML
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file (default: stdin; `-` also reads stdin)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Recipe file applied before any operation flags
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub recipe: Option<PathBuf>,

    /// Add CLASS to every TAG element (repeatable)
    #[arg(short, long, value_name = "TAG=CLASS", value_parser = parse_pair)]
    pub class: Vec<(String, String)>,

    /// Replace existing class/alt values instead of appending/keeping them
    #[arg(long)]
    pub overwrite: bool,

    /// Set alt TEXT on images whose src contains FILE (repeatable)
    #[arg(short, long, value_name = "FILE=TEXT", value_parser = parse_pair)]
    pub alt: Vec<(String, String)>,

    /// Annotate TARGET with READING as ruby (repeatable)
    #[arg(long, value_name = "TARGET=READING", value_parser = parse_pair)]
    pub ruby: Vec<(String, String)>,

    /// Annotate at most N occurrences per --ruby target (0 = all)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub limit: usize,

    /// Wrap ruby base text in <rb>
    #[arg(long)]
    pub rb: bool,

    /// Add <rp> parenthesis fallbacks around ruby text
    #[arg(short, long)]
    pub parentheses: bool,

    /// Remove every TAG element and its content (repeatable)
    #[arg(long, value_name = "TAG")]
    pub remove: Vec<String>,

    /// Print operation details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

impl Cli {
    /// Operations given as flags, in recipe form.
    pub fn flag_recipe(&self) -> Recipe {
        Recipe {
            class: self
                .class
                .iter()
                .map(|(tag, class)| ClassOp {
                    tag: tag.clone(),
                    class: class.clone(),
                    overwrite: self.overwrite,
                })
                .collect(),
            alt: self
                .alt
                .iter()
                .map(|(file, text)| AltOp {
                    file: file.clone(),
                    text: text.clone(),
                    overwrite: self.overwrite,
                })
                .collect(),
            ruby: self
                .ruby
                .iter()
                .map(|(target, reading)| RubyOp {
                    target: target.clone(),
                    reading: reading.clone(),
                    limit: self.limit,
                    rb: self.rb,
                    parentheses: self.parentheses,
                })
                .collect(),
            remove: self
                .remove
                .iter()
                .map(|tag| RemoveOp { tag: tag.clone() })
                .collect(),
        }
    }
}

/// Split `KEY=VALUE` at the first `=`. The key must be non-empty.
fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        Some(_) => Err(format!("empty key in `{s}`")),
        None => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}
