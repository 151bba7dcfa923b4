mod reports;
mod runner;
mod scenarios;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use review_panel::TransitionTrace;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use runner::{LogicTester, ScenarioResult};
use scenarios::{expand_scenarios, get_scenario, list_scenarios};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "review-tester", version)]
#[command(about = "Replays review overlay traces through the transition controller")]
struct Args {
    /// Built-in scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Extra JSON trace files (a single trace or an array of traces)
    #[arg(long = "trace")]
    traces: Vec<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Print every replayed step
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let tester = LogicTester::new(args.verbose);
    let mut results = run_builtin_scenarios(&args, &tester);
    for path in &args.traces {
        for trace in load_traces(path)? {
            results.push(tester.run_trace(&trace));
        }
    }

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = open_output(args.output.as_deref())?;
    writeln!(output_target, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target, "  {key:15} - {description}")?;
    }
    output_target.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🔎 Review Transition Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn run_builtin_scenarios(args: &Args, tester: &LogicTester) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    for name in expand_scenarios(&split_csv(&args.scenarios)) {
        if let Some(scenario) = get_scenario(&name) {
            results.push(tester.run_scenario(&scenario));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
        }
    }
    results
}

fn load_traces(path: &Path) -> Result<Vec<TransitionTrace>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trace file {}", path.display()))?;
    let traces = if json.trim_start().starts_with('[') {
        TransitionTrace::list_from_json(&json)
    } else {
        TransitionTrace::from_json(&json).map(|trace| vec![trace])
    };
    let traces = traces.with_context(|| format!("invalid trace file {}", path.display()))?;
    log::info!("loaded {} trace(s) from {}", traces.len(), path.display());
    Ok(traces)
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = open_output(args.output.as_deref())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Review Transition Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush()?;
    Ok(())
}

/// Report sink: the `--output` file when given, buffered stdout otherwise.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(stdout()))),
    }
}
