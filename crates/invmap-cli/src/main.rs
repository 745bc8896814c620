// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result, bail};
use config::Config;
use invmap_app::{AmountFormat, AppState, Portfolio, Tab, summarize};
use invmap_tui::ViewOptions;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `invmap --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    let logging = logging::init(&config)?;
    let mut portfolio = Portfolio::from_seed();
    let format = config.amount_format();
    info!(
        config = %options.config_path.display(),
        logging,
        "portfolio loaded from seed"
    );

    if options.summary {
        print!("{}", summary_output(&portfolio, &format, options.json)?);
        return Ok(());
    }

    let mut state = AppState {
        active_tab: options.start_tab.unwrap_or_else(|| config.start_tab()),
        ..AppState::default()
    };
    invmap_tui::run_app(&mut state, &mut portfolio, ViewOptions { format })
}

fn summary_output(portfolio: &Portfolio, format: &AmountFormat, json: bool) -> Result<String> {
    let summary = summarize(portfolio);
    if json {
        let mut encoded = serde_json::to_string_pretty(&summary).context("encode summary")?;
        encoded.push('\n');
        return Ok(encoded);
    }
    Ok(summary.render_text(format))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    start_tab: Option<Tab>,
    print_config_path: bool,
    print_example: bool,
    summary: bool,
    json: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        start_tab: None,
        print_config_path: false,
        print_example: false,
        summary: false,
        json: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--tab" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--tab requires a tab name"))?;
                let tab = Tab::parse(value.as_ref()).ok_or_else(|| {
                    anyhow::anyhow!(
                        "unknown tab {:?}; use overview, stabilize, enhance or transform",
                        value.as_ref()
                    )
                })?;
                options.start_tab = Some(tab);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--summary" => {
                options.summary = true;
            }
            "--json" => {
                options.json = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.json && !options.summary {
        bail!("--json only applies to --summary");
    }

    Ok(options)
}

fn print_help() {
    println!("invmap - investment map");
    println!("  --config <path>          Use a specific config path");
    println!("  --tab <name>             Start on overview, stabilize, enhance or transform");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --summary                Print horizon and theme totals, then exit");
    println!("  --json                   With --summary, print JSON instead of text");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args, summary_output};
    use anyhow::Result;
    use invmap_app::{AmountFormat, Horizon, Portfolio, Tab};
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/invmap-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                start_tab: None,
                print_config_path: false,
                print_example: false,
                summary: false,
                json: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_parses_start_tab_case_insensitively() -> Result<()> {
        let options = parse_cli_args(vec!["--tab", "ENHANCE"], default_options_path())?;
        assert_eq!(options.start_tab, Some(Tab::Horizon(Horizon::Enhance)));
        Ok(())
    }

    #[test]
    fn parse_cli_args_rejects_unknown_tab() {
        let error = parse_cli_args(vec!["--tab", "roadmap"], default_options_path())
            .expect_err("unknown tab should fail");
        assert!(error.to_string().contains("unknown tab"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.summary);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_json_requires_summary() -> Result<()> {
        let error = parse_cli_args(vec!["--json"], default_options_path())
            .expect_err("json without summary should fail");
        assert!(error.to_string().contains("--summary"));

        let options = parse_cli_args(vec!["--json", "--summary"], default_options_path())?;
        assert!(options.summary);
        assert!(options.json);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn text_summary_lists_seed_totals() -> Result<()> {
        let output = summary_output(&Portfolio::from_seed(), &AmountFormat::default(), false)?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Stabilize: R22.8m");
        assert!(output.contains("\nEnhance: R25.6m\n"));
        assert!(output.contains("\nTransform: R26.1m\n"));
        assert!(output.contains("  Compliance & Reporting Readiness (Reg Ops) (1 items): R6.3m"));
        Ok(())
    }

    #[test]
    fn json_summary_is_machine_readable() -> Result<()> {
        let output = summary_output(&Portfolio::from_seed(), &AmountFormat::default(), true)?;
        let value: serde_json::Value = serde_json::from_str(&output)?;
        let horizons = value["horizons"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("horizons array"))?;
        assert_eq!(horizons.len(), 3);
        assert_eq!(horizons[0]["horizon"], "Stabilize");
        assert_eq!(horizons[2]["total"].as_f64(), Some(26.1));
        assert_eq!(horizons[1]["themes"][3]["bau_items"], 1);
        Ok(())
    }
}
