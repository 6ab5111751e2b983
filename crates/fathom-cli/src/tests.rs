//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use fathom_core::test_utils::{all_green_snapshot, all_red_snapshot};
use fathom_core::{FinancialSnapshot, ForecastParams, Scenario};
use tempfile::TempDir;

use crate::cli::{Cli, Commands, ForecastArgs, SampleFormat};
use crate::commands::{self, money};

/// Write a scenario file into a temp dir and return (dir, path)
fn write_scenario(scenario: &Scenario, extension: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(format!("snapshot.{}", extension));
    let content = match extension {
        "json" => serde_json::to_string_pretty(scenario).unwrap(),
        _ => toml::to_string_pretty(scenario).unwrap(),
    };
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

fn scenario_of(snapshot: FinancialSnapshot) -> Scenario {
    Scenario {
        snapshot,
        forecast: None,
    }
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_report_with_forecast_flags() {
    let cli = Cli::parse_from([
        "fathom",
        "report",
        "--input",
        "me.toml",
        "--current-age",
        "40",
        "--return-rate",
        "5.5",
        "--json",
    ]);

    match cli.command {
        Commands::Report {
            input,
            forecast,
            json,
        } => {
            assert_eq!(input, PathBuf::from("me.toml"));
            assert_eq!(forecast.current_age, Some(40));
            assert_eq!(forecast.return_rate, Some(5.5));
            assert_eq!(forecast.retirement_age, None);
            assert!(json);
        }
        _ => panic!("expected report command"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["fathom", "config", "--config", "custom.toml", "-v"]);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    assert!(cli.verbose);
}

#[test]
fn test_parse_serve_origins() {
    let cli = Cli::parse_from([
        "fathom",
        "serve",
        "--allowed-origin",
        "http://localhost:5173",
        "--allowed-origin",
        "https://example.com",
    ]);
    match cli.command {
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert_eq!(allowed_origins.len(), 2);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_sample_format_rejects_unknown() {
    assert!(Cli::try_parse_from(["fathom", "sample", "--format", "yaml"]).is_err());
}

// ========== Forecast Override Tests ==========

#[test]
fn test_resolve_forecast_defaults() {
    let scenario = scenario_of(FinancialSnapshot::sample());
    let params = commands::resolve_forecast(&scenario, &ForecastArgs::default()).unwrap();
    assert_eq!(params, ForecastParams::default());
}

#[test]
fn test_resolve_forecast_flags_override_file() {
    let scenario = Scenario {
        snapshot: FinancialSnapshot::sample(),
        forecast: Some(ForecastParams {
            current_age: 45,
            retirement_age: 70,
            annual_return: 0.04,
            additional_savings: 50.0,
        }),
    };
    let args = ForecastArgs {
        return_rate: Some(6.0),
        extra_savings: Some(400.0),
        ..Default::default()
    };

    let params = commands::resolve_forecast(&scenario, &args).unwrap();
    assert_eq!(params.current_age, 45);
    assert_eq!(params.retirement_age, 70);
    assert!((params.annual_return - 0.06).abs() < 1e-12);
    assert_eq!(params.additional_savings, 400.0);
}

#[test]
fn test_resolve_forecast_rejects_inverted_ages() {
    let scenario = scenario_of(FinancialSnapshot::sample());
    let args = ForecastArgs {
        current_age: Some(66),
        ..Default::default()
    };
    assert!(commands::resolve_forecast(&scenario, &args).is_err());
}

// ========== Snapshot Loading Tests ==========

#[test]
fn test_load_scenario_toml_and_json() {
    for ext in ["toml", "json"] {
        let (_dir, path) = write_scenario(&scenario_of(FinancialSnapshot::sample()), ext);
        let scenario = commands::load_scenario(&path).unwrap();
        assert_eq!(scenario.snapshot, FinancialSnapshot::sample());
    }
}

#[test]
fn test_load_scenario_rejects_negative_amount() {
    let mut snapshot = FinancialSnapshot::sample();
    snapshot.income.salary = -1.0;
    let (_dir, path) = write_scenario(&scenario_of(snapshot), "toml");

    let err = commands::load_scenario(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("income.salary"));
}

#[test]
fn test_load_scenario_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.yaml");
    std::fs::write(&path, "income: {}").unwrap();

    assert!(commands::load_scenario(&path).is_err());
}

#[test]
fn test_load_scenario_partial_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[income]\nsalary = 5000\n").unwrap();

    let scenario = commands::load_scenario(file.path()).unwrap();
    assert_eq!(scenario.snapshot.income.salary, 5000.0);
    assert_eq!(scenario.snapshot.expenses.housing, 0.0);
    assert!(scenario.forecast.is_none());
}

// ========== Config Tests ==========

#[test]
fn test_load_engine_config_missing_explicit_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(commands::load_engine_config(Some(&missing)).is_err());
}

#[test]
fn test_load_engine_config_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[assumptions]\nwithdrawal_rate = 0.035\n").unwrap();

    let config = commands::load_engine_config(Some(&path)).unwrap();
    assert_eq!(config.assumptions.withdrawal_rate, 0.035);
    assert_eq!(config.assumptions.replacement_target, 70.0);
}

#[test]
fn test_cmd_config_with_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[thresholds.savings_rate]\ncutoffs = [5.0, 15.0]\n").unwrap();

    assert!(commands::cmd_config(Some(&path)).is_ok());
}

// ========== Command Tests ==========

#[test]
fn test_build_report_from_file() {
    let (_dir, path) = write_scenario(&scenario_of(FinancialSnapshot::sample()), "toml");
    let report = commands::build_report(&path, None, &ForecastArgs::default()).unwrap();

    assert_eq!(report.totals.monthly_savings, 300.0);
    assert_eq!(report.forecast.retirement.years_to_retirement, 35);
}

#[test]
fn test_cmd_report_all_outputs() {
    let (_dir, path) = write_scenario(&scenario_of(all_red_snapshot()), "json");
    let args = ForecastArgs::default();

    assert!(commands::cmd_report(&path, None, &args, false).is_ok());
    assert!(commands::cmd_report(&path, None, &args, true).is_ok());
    assert!(commands::cmd_health(&path, None, false).is_ok());
    assert!(commands::cmd_health(&path, None, true).is_ok());
    assert!(commands::cmd_advice(&path, None).is_ok());
    assert!(commands::cmd_forecast(&path, None, &args, false).is_ok());
}

#[test]
fn test_cmd_forecast_healthy_snapshot() {
    let (_dir, path) = write_scenario(&scenario_of(all_green_snapshot()), "toml");
    let args = ForecastArgs {
        extra_savings: Some(0.0),
        ..Default::default()
    };
    assert!(commands::cmd_forecast(&path, None, &args, true).is_ok());
}

#[test]
fn test_cmd_report_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    assert!(commands::cmd_report(&path, None, &ForecastArgs::default(), false).is_err());
}

#[test]
fn test_sample_output_loads_back() {
    for (format, ext) in [(SampleFormat::Toml, "toml"), (SampleFormat::Json, "json")] {
        let rendered = commands::render_sample(format).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(format!("sample.{}", ext));
        std::fs::write(&path, rendered).unwrap();

        let scenario = commands::load_scenario(&path).unwrap();
        assert_eq!(scenario.snapshot, FinancialSnapshot::sample());
        assert_eq!(scenario.forecast, Some(ForecastParams::default()));
    }
}

// ========== Formatting Tests ==========

#[test]
fn test_money() {
    assert_eq!(money(0.0), "$0.00");
    assert_eq!(money(999.5), "$999.50");
    assert_eq!(money(1234.5), "$1,234.50");
    assert_eq!(money(1_234_567.891), "$1,234,567.89");
    assert_eq!(money(-300.0), "-$300.00");
    assert_eq!(money(-0.001), "$0.00");
}
