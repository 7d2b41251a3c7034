use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hither::assets::{AssetLoader, CONFIG_ENV_VAR};
use hither::models::AppConfig;
use hither::rendering::format_matrix;
use hither::services::{RenderRequest, RenderService};
use palette_dither::{
    DiffusionKernel, DistanceMetric, DitherStrategy, MatrixOrder, ThresholdMatrix,
};

#[derive(Parser)]
#[command(name = "hither")]
#[command(about = "Dither images onto fixed color palettes")]
struct Cli {
    /// Config file (overrides the HITHER_CONFIG env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a PNG to an indexed PNG
    Dither {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Profile from the config (default: default_profile)
        #[arg(short, long)]
        profile: Option<String>,

        /// nearest, error-diffusion, bayer, cluster-dot or yliluoma
        #[arg(short, long)]
        strategy: Option<DitherStrategy>,

        /// Error diffusion kernel (e.g. floyd-steinberg, atkinson)
        #[arg(short, long)]
        kernel: Option<DiffusionKernel>,

        /// Threshold matrix order, N or WxH
        #[arg(long)]
        order: Option<MatrixOrder>,

        /// euclidean, manhattan, chebyshev, psychovisual or a norm order
        #[arg(short, long)]
        metric: Option<DistanceMetric>,

        /// Ordered-dither thresholds as "r,g,b" or a single value
        #[arg(short, long, value_parser = parse_thresholds)]
        thresholds: Option<[f64; 3]>,

        /// Palette as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
        #[arg(long)]
        colors: Option<String>,

        /// Build the palette from the input by median cut
        #[arg(long, value_name = "N")]
        median_cut: Option<usize>,

        /// Use the palette of an indexed input PNG
        #[arg(long)]
        from_input: bool,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// Print the palette of a PNG as hex colors
    Palette {
        /// Input PNG file
        input: PathBuf,

        /// Median cut to N colors instead of reading the PLTE
        #[arg(long, value_name = "N")]
        median_cut: Option<usize>,
    },
    /// Print a threshold matrix
    Matrix {
        kind: MatrixKind,

        /// N, or WxH for cluster-dot 5x3
        order: MatrixOrder,

        /// Print factors as decimals instead of fractions
        #[arg(long)]
        decimal: bool,
    },
    /// Write the embedded default config for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// Target path (default: --config, HITHER_CONFIG or ./config.yaml)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MatrixKind {
    Bayer,
    ClusterDot,
    Yliluoma,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loader = AssetLoader::from_env(cli.config);

    match cli.command {
        Some(Commands::Dither {
            input,
            output,
            profile,
            strategy,
            kernel,
            order,
            metric,
            thresholds,
            colors,
            median_cut,
            from_input,
            optimize,
        }) => {
            let request = RenderRequest {
                profile,
                strategy,
                kernel,
                order,
                metric,
                thresholds,
                colors,
                median_cut,
                from_input,
                optimize,
            };
            run_dither_command(&loader, &input, &output, &request)
        }
        Some(Commands::Palette { input, median_cut }) => {
            run_palette_command(&loader, &input, median_cut)
        }
        Some(Commands::Matrix {
            kind,
            order,
            decimal,
        }) => run_matrix_command(kind, order, decimal),
        Some(Commands::Init { force, output }) => run_init_command(&loader, output, force),
        None => {
            run_status_command(&loader);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "hither=debug,palette_dither=debug"
    } else {
        "hither=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn parse_thresholds(s: &str) -> Result<[f64; 3], String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid threshold: {e}"))?;
    match values.as_slice() {
        [v] => Ok([*v; 3]),
        [r, g, b] => Ok([*r, *g, *b]),
        _ => Err(format!("expected 1 or 3 values, got {}", values.len())),
    }
}

fn run_dither_command(
    loader: &AssetLoader,
    input: &Path,
    output: &Path,
    request: &RenderRequest,
) -> anyhow::Result<()> {
    let config = AppConfig::load_from_assets(loader);
    let service = RenderService::new(config);
    let result = service
        .render_file(input, output, request)
        .with_context(|| format!("Failed to dither {}", input.display()))?;

    println!(
        "Wrote {} ({}x{}, {} colors, {}, {} bytes)",
        output.display(),
        result.image.width(),
        result.image.height(),
        result.image.palette().len(),
        result.strategy,
        result.png.len()
    );
    Ok(())
}

fn run_palette_command(
    loader: &AssetLoader,
    input: &Path,
    median_cut: Option<usize>,
) -> anyhow::Result<()> {
    let data =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let service = RenderService::new(AppConfig::load_from_assets(loader));
    let palette = service
        .extract_palette(&data, median_cut)
        .with_context(|| format!("Failed to read palette of {}", input.display()))?;

    for hex in palette.to_hex_strings() {
        println!("{hex}");
    }
    Ok(())
}

fn run_matrix_command(kind: MatrixKind, order: MatrixOrder, decimal: bool) -> anyhow::Result<()> {
    let side = || {
        order
            .side()
            .with_context(|| format!("{order} is not a square order"))
    };
    let matrix = match kind {
        MatrixKind::Bayer => ThresholdMatrix::bayer(side()?)?,
        MatrixKind::ClusterDot => ThresholdMatrix::cluster_dot(order)?,
        MatrixKind::Yliluoma => ThresholdMatrix::bayer_mixing(side()?)?,
    };
    print!("{}", format_matrix(&matrix, decimal));
    Ok(())
}

fn run_init_command(
    loader: &AssetLoader,
    output: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let report = loader
        .init(output.as_deref(), force)
        .context("Failed to write config")?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} exists (use --force to overwrite)");
    }
    Ok(())
}

fn run_status_command(loader: &AssetLoader) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config = AppConfig::load_from_assets(loader);

    println!("Hither v{VERSION} - dither images onto fixed color palettes\n");

    println!("Config:");
    let env_config = std::env::var(CONFIG_ENV_VAR).ok();
    println!(
        "  {CONFIG_ENV_VAR} = {}",
        env_config.as_deref().unwrap_or("(not set)")
    );
    println!("  source        = {}", loader.config_source());
    if let Some(ref name) = config.default_profile {
        println!("  default       = {name}");
    }

    println!("\nPalettes:");
    for name in config.palette_names() {
        let count = config.palettes.get(name).map_or(0, Vec::len);
        println!("  {name:<12} {count} colors");
    }

    println!("\nProfiles:");
    for name in config.profile_names() {
        if let Ok(Some(profile)) = config.profile(Some(name)) {
            let strategy = profile.strategy.as_deref().unwrap_or("error-diffusion");
            println!("  {name:<12} {} / {strategy}", profile.palette);
        }
    }

    println!("\nStrategies:");
    for strategy in DitherStrategy::ALL {
        println!("  {strategy}");
    }

    println!("\nKernels:");
    for kernel in DiffusionKernel::ALL {
        println!("  {kernel}");
    }

    println!("\nCommands:");
    println!("  hither dither    Dither a PNG to an indexed PNG");
    println!("  hither palette   Print the palette of a PNG");
    println!("  hither matrix    Print a threshold matrix");
    println!("  hither init      Write the default config");
    println!("\nRun 'hither --help' for more details.");
}
