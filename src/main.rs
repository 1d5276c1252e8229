use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atarigr::error::AppError;
use atarigr::models::AppConfig;
use atarigr::services::{preview_all, ConversionReport, ConversionService, ConvertOptions};
use gr_pack::pack::{Occlusion, Strategy};
use gr_pack::GraphicsMode;

#[derive(Parser)]
#[command(name = "atarigr")]
#[command(about = "Convert photos into Atari 8-bit GRAPHICS 8-15 drawing programs")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $ATARIGR_CONFIG or ./atarigr.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize an image and generate a Pascal program that draws it
    Convert {
        /// Input image (any format the image crate decodes)
        image: PathBuf,

        /// GRAPHICS mode: 8, 9, 10, 11, 14 or 15
        #[arg(short, long)]
        mode: Option<u8>,

        /// Primitive type: "rect" or "hline"
        #[arg(short, long)]
        compression: Option<Strategy>,

        /// "exact" keeps primitives inside their color, "overdraw" lets later colors paint over
        #[arg(long)]
        occlusion: Option<Occlusion>,

        /// Pack the most common color instead of clearing the screen to it
        #[arg(long)]
        keep_background: bool,

        /// Directory for preview and layer PNGs
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output Pascal program
        #[arg(short, long)]
        program: Option<PathBuf>,

        /// Also dump the packed primitives as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write one mask PNG per color layer
        #[arg(long)]
        layers: bool,
    },
    /// Write quantized previews of an image for every mode
    Preview {
        /// Input image
        image: PathBuf,

        /// Directory for gr<mode>.png files
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// List supported modes with resolutions and palettes
    Modes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atarigr=info,gr_pack=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Convert {
            image,
            mode,
            compression,
            occlusion,
            keep_background,
            out_dir,
            program,
            json,
            layers,
        } => {
            let mode = mode.or(config.default_mode).ok_or(AppError::MissingMode)?;
            let mut options = ConvertOptions::from_config(&config, mode);
            if let Some(strategy) = compression {
                options.strategy = strategy;
            }
            if let Some(occlusion) = occlusion {
                options.occlusion = occlusion;
            }
            if let Some(out_dir) = out_dir {
                options.out_dir = out_dir;
            }
            if let Some(program) = program {
                options.program = program;
            }
            options.keep_background |= keep_background;
            options.write_layers |= layers;
            options.json = json;

            let report = ConversionService::new(options)?.convert(&image)?;
            print_report(&report);
            Ok(())
        }
        Commands::Preview { image, out_dir } => {
            let out_dir = out_dir.unwrap_or(config.out_dir);
            for path in preview_all(&image, &out_dir)? {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Modes => {
            print_modes();
            Ok(())
        }
    }
}

fn print_report(report: &ConversionReport) {
    match report.background {
        Some((index, color)) => println!("Background color: {index} ({color})"),
        None => println!("Background color: none (packed as a layer)"),
    }
    let unit = match report.strategy {
        Strategy::Rect => "rectangles",
        Strategy::Hline => "run entries",
    };
    println!(
        "GRAPHICS {}: {} layers, {} {unit} ({} occlusion)",
        report.mode, report.layer_count, report.primitive_count, report.occlusion
    );
    println!("Bytes used for raw data: {}", report.data_bytes);
    println!("Quantization error: {:.1}", report.delta_sum);
    println!("Preview: {}", report.preview.display());
    if !report.layer_masks.is_empty() {
        println!("Layer masks: {}", report.layer_masks.len());
    }
    println!("Program: {}", report.program.display());
    if let Some(json) = &report.json {
        println!("JSON: {}", json.display());
    }
}

fn print_modes() {
    for mode in GraphicsMode::all() {
        let colors: Vec<String> = mode.colors().iter().map(|c| c.to_string()).collect();
        println!(
            "GRAPHICS {:>2}  {}x{}  {} colors: {}",
            mode.id(),
            mode.width(),
            mode.height(),
            mode.len(),
            colors.join(" ")
        );
    }
}
