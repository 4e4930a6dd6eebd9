//! Command-line interface module.

mod args;

pub use args::Cli;

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use denshoch::{HtmlModifier, Recipe, log};

/// Read, modify and write one document as described by `cli`.
pub fn run(cli: &Cli) -> Result<()> {
    let input = read_input(cli.input.as_deref())?;

    let mut modifier = HtmlModifier::new(&input).context("failed to load input")?;
    log!("load"; "{} ({} bytes{})", source_name(cli.input.as_deref()), input.len(),
        if modifier.is_synthetic() { ", fragment" } else { "" });

    if let Some(path) = &cli.recipe {
        let recipe = Recipe::from_path(path)
            .with_context(|| format!("failed to load recipe {}", path.display()))?;
        recipe
            .apply(&mut modifier)
            .with_context(|| format!("failed to apply recipe {}", path.display()))?;
    }
    cli.flag_recipe()
        .apply(&mut modifier)
        .context("failed to apply operations")?;

    let output = modifier.save();
    write_output(cli.output.as_deref(), &output)?;
    if let Some(path) = &cli.output {
        log!("save"; "{} ({} bytes)", path.display(), output.len());
    }
    Ok(())
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p == Path::new("-"))
}

fn source_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if !is_stdin(path) => p.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if !is_stdin(path) => {
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(p) => fs::write(p, content).with_context(|| format!("failed to write {}", p.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("denshoch").chain(args.iter().copied())).unwrap()
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_run_with_recipe_then_flags() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xhtml");
        let recipe = dir.path().join("recipe.toml");
        let output = dir.path().join("out.xhtml");
        fs::write(&input, "<p>太郎と太郎</p>").unwrap();
        fs::write(&recipe, "[[class]]\ntag = \"p\"\nclass = \"a\"\n").unwrap();

        let cli = parse(&[
            path_str(&input),
            "-o",
            path_str(&output),
            "--recipe",
            path_str(&recipe),
            "--class",
            "p=b",
            "--ruby",
            "太郎=タロウ",
            "--limit",
            "1",
        ]);
        run(&cli).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            r#"<p class="a b"><ruby>太郎<rt>タロウ</rt></ruby>と太郎</p>"#
        );
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.xhtml");
        let err = run(&parse(&[path_str(&missing)])).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_run_reports_malformed_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.xhtml");
        fs::write(&input, "<p><b></p>").unwrap();
        let err = run(&parse(&[path_str(&input)])).unwrap_err();
        assert!(err.to_string().contains("failed to load input"));
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source_name(None), "<stdin>");
        assert_eq!(source_name(Some(Path::new("-"))), "<stdin>");
        assert_eq!(source_name(Some(Path::new("a.html"))), "a.html");
    }
}
