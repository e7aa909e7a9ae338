use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use hgrid_core::{GridConfig, GridSettings, SlideConfig, Size};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::replay::{ReplayEvent, replay_grid_with, replay_slide};
use crate::trace::read_trace;

#[derive(Debug, Parser)]
#[command(
    name = "hgrid-harness",
    about = "Replay recorded pointer and drag traces through the haptic grid core",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay pointer records through the grid tracker.
    Grid(GridArgs),

    /// Replay drag records through the slide-to-confirm control.
    Slide(SlideArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    #[arg(long)]
    pub trace: PathBuf,

    /// JSON grid settings; explicit flags below take precedence.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[arg(long)]
    pub rows: Option<u16>,

    #[arg(long)]
    pub cols: Option<u16>,

    #[arg(long, default_value_t = 400.0)]
    pub width: f64,

    #[arg(long, default_value_t = 400.0)]
    pub height: f64,

    #[arg(long = "dot-size")]
    pub dot_size: Option<f64>,

    #[arg(long)]
    pub padding: Option<f64>,
}

#[derive(Debug, Clone, Args)]
pub struct SlideArgs {
    #[arg(long)]
    pub trace: PathBuf,

    #[arg(long = "track-length", default_value_t = 42)]
    pub track_length: u16,

    #[arg(long = "slider-width", default_value_t = 6)]
    pub slider_width: u16,

    #[arg(long, default_value_t = hgrid_core::rubber_band::DEFAULT_COEFFICIENT)]
    pub coefficient: f64,

    #[arg(long = "step-ms", default_value_t = 9)]
    pub step_ms: u64,

    /// Override the on-screen track length carried by each drag record.
    #[arg(long = "track-px")]
    pub track_px: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SummaryLine<'a, S: Serialize> {
    summary: &'a S,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Grid(args) => run_grid(&args, out),
        Commands::Slide(args) => run_slide(&args, out),
    }
}

fn run_grid(args: &GridArgs, out: &mut impl Write) -> Result<()> {
    let (config, haptics_enabled) = grid_config(args)?;
    let records = read_trace(&args.trace)?;
    tracing::debug!(
        rows = config.rows,
        cols = config.cols,
        records = records.len(),
        "replaying grid trace"
    );
    let view = Size::new(args.width, args.height);
    let replay = replay_grid_with(&config, view, &records, haptics_enabled)?;
    emit(out, &replay.events, &replay.summary)
}

fn run_slide(args: &SlideArgs, out: &mut impl Write) -> Result<()> {
    let config = SlideConfig {
        track_length: args.track_length,
        slider_width: args.slider_width,
        rubber_band_coefficient: args.coefficient,
        step_interval: Duration::from_millis(args.step_ms),
        ..SlideConfig::default()
    };
    config.validate()?;
    if let Some(px) = args.track_px
        && !(px.is_finite() && px > 0.0)
    {
        return Err(HarnessError::invalid(format!(
            "--track-px must be a positive number (got {px})"
        )));
    }
    let records = read_trace(&args.trace)?;
    tracing::debug!(
        track_length = config.track_length,
        slider_width = config.slider_width,
        records = records.len(),
        "replaying slide trace"
    );
    let replay = replay_slide(&config, &records, args.track_px)?;
    emit(out, &replay.events, &replay.summary)
}

/// Resolve the grid configuration from settings plus flag overrides.
fn grid_config(args: &GridArgs) -> Result<(GridConfig, bool)> {
    let settings = args.settings.as_deref().map(load_settings).transpose()?;
    let (mut config, haptics_enabled) = match settings {
        Some(settings) => (settings.to_grid_config()?, settings.haptics_enabled),
        None => (GridConfig::default(), true),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(dot_size) = args.dot_size {
        config.dot_size = dot_size;
    }
    if let Some(padding) = args.padding {
        config.dot_padding = padding;
    }
    config.validate()?;
    Ok((config, haptics_enabled))
}

fn load_settings(path: &Path) -> Result<GridSettings> {
    if !path.exists() {
        return Err(HarnessError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn emit(out: &mut impl Write, events: &[ReplayEvent], summary: &impl Serialize) -> Result<()> {
    for event in events {
        serde_json::to_writer(&mut *out, event)?;
        out.write_all(b"\n")?;
    }
    serde_json::to_writer(&mut *out, &SummaryLine { summary })?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn grid_flags_parse() {
        let cli = Cli::try_parse_from([
            "hgrid-harness",
            "grid",
            "--trace",
            "t.jsonl",
            "--rows",
            "8",
            "--dot-size",
            "20",
        ])
        .unwrap();
        let Commands::Grid(args) = cli.command else {
            panic!("expected grid subcommand");
        };
        assert_eq!(args.rows, Some(8));
        assert_eq!(args.cols, None);
        assert_eq!(args.dot_size, Some(20.0));
        assert_eq!(args.width, 400.0);
    }

    #[test]
    fn slide_defaults_match_core_defaults() {
        let cli = Cli::try_parse_from(["hgrid-harness", "slide", "--trace", "t.jsonl"]).unwrap();
        let Commands::Slide(args) = cli.command else {
            panic!("expected slide subcommand");
        };
        let defaults = SlideConfig::default();
        assert_eq!(args.track_length, defaults.track_length);
        assert_eq!(args.slider_width, defaults.slider_width);
        assert_eq!(args.coefficient, defaults.rubber_band_coefficient);
        assert_eq!(
            Duration::from_millis(args.step_ms),
            defaults.step_interval
        );
    }

    #[test]
    fn flags_override_settings() {
        let dir = tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        fs::write(
            &settings,
            r#"{"grid_rows": 30, "grid_cols": 7, "haptics_enabled": false}"#,
        )
        .unwrap();
        let args = GridArgs {
            trace: dir.path().join("unused.jsonl"),
            settings: Some(settings),
            rows: None,
            cols: Some(9),
            width: 400.0,
            height: 400.0,
            dot_size: None,
            padding: None,
        };
        let (config, haptics) = grid_config(&args).unwrap();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 9);
        assert!(!haptics);
    }

    #[test]
    fn invalid_slider_is_config_error() {
        let args = SlideArgs {
            trace: PathBuf::from("missing.jsonl"),
            track_length: 4,
            slider_width: 5,
            coefficient: 4.5,
            step_ms: 9,
            track_px: None,
        };
        let error = run_slide(&args, &mut Vec::new()).unwrap_err();
        assert_eq!(error.exit_code(), crate::error::EXIT_CONFIG);
    }

    #[test]
    fn missing_trace_reported() {
        let args = SlideArgs {
            trace: PathBuf::from("/nonexistent/trace.jsonl"),
            track_length: 42,
            slider_width: 6,
            coefficient: 4.5,
            step_ms: 9,
            track_px: None,
        };
        let error = run_slide(&args, &mut Vec::new()).unwrap_err();
        assert!(matches!(error, HarnessError::MissingPath { .. }));
    }
}
