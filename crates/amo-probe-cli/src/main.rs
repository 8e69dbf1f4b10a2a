//! amo-probe CLI: acceptance suite for the add-ons marketplace
//!
//! ## Usage
//!
//! ```bash
//! amo-probe list --tag themes                 # Scenarios tagged "themes"
//! amo-probe run --mock                        # Whole suite on the mock site
//! amo-probe run -c suite.yaml -f sort_by      # Real site, sorting scenarios
//! amo-probe run --mock --format json -o r.json
//! amo-probe config -c suite.yaml              # Effective config, passwords hidden
//! ```
//!
//! Exit status: 0 when every scenario passed or was skipped, 1 when a
//! scenario failed, 2 on a usage or setup error.

use amo_probe_cli::{
    init_logging, listed, redacted, render, run_suite, suite_config, Cli, CliResult, ColorChoice,
    Commands, ConfigArgs, ListArgs, ProgressReporter, RunArgs, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    init_logging(verbosity, cli.log_json);
    let color = ColorChoice::from(cli.color).should_color();

    let outcome = match cli.command {
        Commands::List(args) => run_list(&args),
        Commands::Run(args) => run_run(&args, verbosity, color),
        Commands::Config(args) => run_config(&args),
    };
    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run_list(args: &ListArgs) -> CliResult<ExitCode> {
    for scenario in listed(&args.select) {
        if args.tags_column {
            println!("{:<44} {}", scenario.name, scenario.tags.join(","));
        } else {
            println!("{}", scenario.name);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_run(args: &RunArgs, verbosity: Verbosity, color: bool) -> CliResult<ExitCode> {
    let config = suite_config(&args.site)?;
    tracing::info!(base_url = %config.base_url, mock = args.site.mock, "suite config ready");
    let mut reporter = ProgressReporter::new(color, verbosity.is_quiet());
    let report = run_suite(config, args, &mut reporter)?;

    if let Some(path) = &args.output {
        report.write(path)?;
        tracing::info!(path = %path.display(), "report written");
    }
    print!("{}", render(&report, args.format)?);
    if !verbosity.is_quiet() {
        eprintln!("{}", report.summary());
    }
    Ok(if report.failed_count() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_config(args: &ConfigArgs) -> CliResult<ExitCode> {
    let config = suite_config(&args.site)?;
    print!("{}", serde_yaml_ng::to_string(&redacted(&config))?);
    Ok(ExitCode::SUCCESS)
}
