//! `wcl`: lint a world-simulation configuration snapshot

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use wcl_io::ExportFormat;

mod commands;

fn cli() -> Command {
    let file = || {
        Arg::new("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Snapshot file (.json, .yaml or .yml)")
    };

    Command::new("wcl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Referential-integrity and balance linter for world-simulation configs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("check")
                .about("Run every rule and print the issues")
                .arg(file())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Exit non-zero on warnings as well as errors"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Print the overall status and issue counts")
                .arg(file())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export issues as a JSON or CSV report")
                .arg(file())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .value_parser(["json", "csv"])
                        .help("Report format"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write to this file instead of stdout"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn file_arg(args: &ArgMatches) -> anyhow::Result<&PathBuf> {
    args.get_one::<PathBuf>("file")
        .ok_or_else(|| anyhow::anyhow!("missing snapshot file"))
}

fn main() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("check", args)) => commands::check(file_arg(args)?, args.get_flag("strict")),
        Some(("status", args)) => commands::status(file_arg(args)?, args.get_flag("json")),
        Some(("export", args)) => {
            let format = args
                .get_one::<String>("format")
                .ok_or_else(|| anyhow::anyhow!("missing --format"))?
                .parse::<ExportFormat>()
                .map_err(anyhow::Error::msg)?;
            let out = args.get_one::<PathBuf>("out").map(PathBuf::as_path);
            commands::export(file_arg(args)?, format, out)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
