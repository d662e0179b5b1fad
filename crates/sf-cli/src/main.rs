mod config;
mod driver;
mod surface;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sf_core::{
    FieldConfig, FrameRecord, OscillatorField, Point, PointerState, SurfaceSize, encode_frame,
};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::driver::{FrameDriver, PointerScript};
use crate::surface::TextSurface;

#[derive(Parser)]
#[command(name = "sf", about = "Coupled oscillator field simulator")]
struct Cli {
    /// Field config file (TOML); falls back to $SF_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for initial phases and frequencies
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Final coherence only
    Summary,
    /// One JSON frame record per line
    Json,
    /// Draw every frame as text
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the field for a number of frames
    Run {
        #[arg(long, default_value_t = 300)]
        frames: u64,

        #[arg(long, default_value_t = 800.0)]
        width: f64,

        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// Hold the pointer at X,Y (surface coordinates)
        #[arg(long, value_parser = parse_point, conflicts_with = "orbit")]
        pointer: Option<Point>,

        /// Sweep the pointer around the ring
        #[arg(long)]
        orbit: bool,

        /// Pace frames in real time; 0 runs as fast as possible
        #[arg(long, default_value_t = 0.0)]
        fps: f64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
    },

    /// Advance without a pointer and print the resulting frame as JSON
    Snapshot {
        #[arg(long, default_value_t = 0)]
        steps: u64,

        #[arg(long, default_value_t = 800.0)]
        width: f64,

        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

const TEXT_COLS: usize = 72;

/// Character grid for the text surface: fixed width, height following the
/// surface aspect (cells are about twice as tall as wide), capped at a
/// square grid.
fn text_grid(size: SurfaceSize) -> (usize, usize) {
    let rows = (TEXT_COLS as f64 / 2.0) * size.height / size.width;
    let rows = if rows.is_finite() {
        rows.round().clamp(1.0, TEXT_COLS as f64) as usize
    } else {
        TEXT_COLS
    };
    (TEXT_COLS, rows)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn build_field(cli: &Cli, config: &FieldConfig, size: SurfaceSize) -> Result<OscillatorField> {
    let mut rng = make_rng(cli.seed);
    OscillatorField::for_surface(config, size, &mut rng).context("failed to initialize field")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Run {
            frames,
            width,
            height,
            pointer,
            orbit,
            fps,
            format,
        } => {
            let size = SurfaceSize::new(*width, *height);
            let field = build_field(&cli, &config, size)?;
            let script = match (*pointer, *orbit) {
                (_, true) => PointerScript::orbit_around(field.ring()),
                (Some(p), false) => PointerScript::Fixed(p),
                (None, false) => PointerScript::Absent,
            };
            let run_id = Uuid::new_v4();
            let span = tracing::info_span!("run", %run_id);
            cmd_run(field, &config, size, script, *frames, *fps, *format, run_id)
                .instrument(span)
                .await
        }
        Commands::Snapshot {
            steps,
            width,
            height,
        } => cmd_snapshot(&cli, &config, *steps, SurfaceSize::new(*width, *height)),
        Commands::Config => cmd_config(&config),
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_run(
    field: OscillatorField,
    config: &FieldConfig,
    size: SurfaceSize,
    script: PointerScript,
    frames: u64,
    fps: f64,
    format: OutputFormat,
    run_id: Uuid,
) -> Result<()> {
    if !fps.is_finite() || fps < 0.0 {
        bail!("--fps must be a non-negative number, got {fps}");
    }
    let paced = fps > 0.0;
    if paced {
        driver::frame_period(fps).context("invalid --fps")?;
    }
    tracing::info!(
        oscillators = field.len(),
        coupling = field.coupling(),
        frames,
        fps,
        "starting run"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut text = (format == OutputFormat::Text).then(|| {
        let (cols, rows) = text_grid(size);
        TextSurface::new(cols, rows, size)
    });

    let sink = |field: &OscillatorField, pointer: PointerState| -> Result<()> {
        match format {
            OutputFormat::Summary => {}
            OutputFormat::Json => {
                let line = encode_frame(field).context("failed to encode frame")?;
                writeln!(out, "{line}")?;
            }
            OutputFormat::Text => {
                let Some(text) = text.as_mut() else {
                    return Ok(());
                };
                text.clear();
                text.draw_ring(field.ring());
                text.draw_oscillators(&field.snapshot());
                text.draw_pointer(pointer);
                if paced {
                    write!(out, "\x1b[H\x1b[2J")?;
                }
                write!(out, "{}", text.render())?;
                writeln!(
                    out,
                    "frame {} r={:.3}",
                    field.steps(),
                    field.order_parameter().coherence
                )?;
            }
        }
        Ok(())
    };

    let mut driver = FrameDriver::new(field, config.time_step, script);
    let completed = if paced {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_signal.cancel();
            }
        });
        driver.run_paced(frames, fps, cancel, sink).await?
    } else {
        driver.run_for(frames, sink)?
    };

    let order = driver.field().order_parameter();
    tracing::info!(completed, coherence = order.coherence, "run finished");

    if format == OutputFormat::Summary {
        writeln!(out, "run:         {run_id}")?;
        writeln!(out, "frames:      {completed}")?;
        writeln!(out, "oscillators: {}", driver.field().len())?;
        writeln!(out, "elapsed:     {:.3}", driver.field().elapsed())?;
        writeln!(out, "coherence:   {:.4}", order.coherence)?;
        writeln!(out, "mean_phase:  {:.4}", order.mean_phase.radians())?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_snapshot(cli: &Cli, config: &FieldConfig, steps: u64, size: SurfaceSize) -> Result<()> {
    let mut field = build_field(cli, config, size)?;
    for _ in 0..steps {
        field.advance(config.time_step, PointerState::Absent);
    }
    let record = FrameRecord::capture(&field);
    let json = serde_json::to_string_pretty(&record).context("failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

fn cmd_config(config: &FieldConfig) -> Result<()> {
    let text = toml::to_string_pretty(config).context("failed to serialize config")?;
    print!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,20.5").unwrap(), Point::new(10.0, 20.5));
        assert_eq!(parse_point(" 3 , 4 ").unwrap(), Point::new(3.0, 4.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_text_grid_is_bounded() {
        assert_eq!(text_grid(SurfaceSize::new(800.0, 600.0)), (72, 27));
        assert_eq!(text_grid(SurfaceSize::new(1.0, 1e9)), (72, 72));
        assert_eq!(text_grid(SurfaceSize::new(1e9, 1.0)), (72, 1));
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        use rand::Rng;
        let a: u64 = make_rng(Some(9)).random();
        let b: u64 = make_rng(Some(9)).random();
        assert_eq!(a, b);
    }
}
