//! formgrid: apply edit plans to a form document and print the result.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use formgrid::{config, edit_plan, store, template, Section};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formgrid")]
#[command(about = "Ordered section/column/field document store for form builders", long_about = None)]
struct Args {
    /// Edit plans to apply, in order
    #[arg(value_name = "PLAN")]
    plans: Vec<PathBuf>,

    /// Template JSON providing the initial sections
    #[arg(long, short = 't', value_name = "PATH")]
    template: Option<PathBuf>,

    /// Start from a single empty section; no template is loaded
    #[arg(long)]
    reset: bool,

    /// Print the final document on one line
    #[arg(long)]
    compact: bool,
}

/// Sections the store starts from (and `useTemplate` restores).
fn initial_sections(args: &Args, cfg: &config::Config) -> io::Result<Vec<Section>> {
    if args.reset {
        return Ok(vec![Section::intro()]);
    }

    // Command line overrides config
    let template_path = args
        .template
        .clone()
        .or_else(|| cfg.template().map(PathBuf::from));

    match template_path {
        Some(path) => template::load_template(&path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
        None => Ok(vec![Section::intro()]),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let cfg = config::Config::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let sections = initial_sections(&args, &cfg)?;

    let mut state = store::DocumentStore::new(sections);
    state.subscribe(|snapshot| {
        tracing::info!(
            version = snapshot.version,
            sections = snapshot.sections.len(),
            "document changed"
        );
    });

    for plan_path in &args.plans {
        let file_content = std::fs::read_to_string(plan_path)?;
        let plan: edit_plan::EditPlan = serde_json::from_str(&file_content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let applied = plan
            .apply(&mut state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        tracing::debug!(plan = %plan_path.display(), applied, "plan applied");
    }

    let snapshot = state.snapshot();
    let json = if cfg.pretty && !args.compact {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .map_err(io::Error::other)?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
#[path = "tests/cli.rs"]
mod tests;
