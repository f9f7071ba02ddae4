use std::io::{self, IsTerminal, Write};
use std::path::{Component, Path, PathBuf};

use clap::Parser;
use unroll_core::{
    plot::{DEFAULT_PLOT_PATH, render_scatter, show_plot},
    prompt::{LineSource, Prompter, StreamLines},
    scenario::run_session,
    trace,
};

use anyhow::Context;

#[cfg(test)]
mod main_test;
mod terminal;

use terminal::Terminal;

#[derive(Debug, Parser)]
#[command(
    name = "unroll",
    author,
    version,
    about = "Interactive benchmark of regular vs unrolled summation loops",
    long_about = None,
    after_help = "Set UNROLL_TRACE=1 to log measurements to stderr."
)]
struct CliArgs {
    /// Where to write the execution-time scatter plot
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_PLOT_PATH, value_parser = parse_sanitized_path)]
    output: PathBuf,

    /// Save the plot without opening it in an image viewer
    #[arg(long)]
    no_show: bool,
}

fn sanitize_path(raw: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(raw);

    if raw.trim().is_empty() {
        return Err(anyhow::anyhow!("Output path must not be empty."));
    }

    for comp in p.components() {
        if matches!(comp, Component::ParentDir) {
            return Err(anyhow::anyhow!(
                "Parent directory components ('..') are not allowed in file paths."
            ));
        }
    }

    Ok(p.to_path_buf())
}

fn parse_sanitized_path(raw: &str) -> Result<PathBuf, String> {
    sanitize_path(raw).map_err(|e| e.to_string())
}

fn run_with<S: LineSource>(source: S, args: &CliArgs) -> anyhow::Result<()> {
    let mut prompter = Prompter::new(source, io::stdout());
    let records = run_session(&mut prompter)?;

    render_scatter(&records, &args.output)
        .with_context(|| format!("Failed to save plot to '{}'", args.output.display()))?;

    let (_, mut out) = prompter.into_parts();
    writeln!(out, "Execution time plot saved as '{}'.", args.output.display())?;
    out.flush()?;
    tracing::info!(target: "unroll_cli", scenarios = records.len(), path = %args.output.display(), "plot saved");

    if !args.no_show {
        show_plot(&args.output);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    trace::init_from_env(trace::TRACE_ENV, trace::DEFAULT_TRACE_FILTER);

    let args = CliArgs::parse();

    let stdin = io::stdin();
    if stdin.is_terminal() {
        run_with(Terminal::new()?, &args)
    } else {
        run_with(StreamLines::new(stdin.lock()), &args)
    }
}
