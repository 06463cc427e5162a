use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use kmeans_quant::io::{default_output_path, open_image, save_bmp};
use kmeans_quant::{quantize, KMeansConfig, Palette, Quantizer};

/// Reduce an image to its K main colors and save it as BMP.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image (PNG, JPEG, BMP or GIF)
    input: PathBuf,

    /// Output BMP path. Defaults to `<input-stem>_<k>colors.bmp` next to the input.
    output: Option<PathBuf>,

    /// Number of colors to extract
    #[arg(short = 'k', long = "colors", default_value_t = 3)]
    colors: usize,

    /// Seed for k-means initialization
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of k-means restarts; the best one is kept
    #[arg(long, default_value_t = 10)]
    restarts: usize,

    /// Iteration cap per restart
    #[arg(long, default_value_t = 300)]
    max_iter: usize,

    /// Comma-separated `#rrggbb` colors to map onto instead of running k-means
    #[arg(short = 'c', long)]
    palette: Option<String>,

    /// Print the palette as JSON records instead of text
    #[arg(long)]
    json: bool,

    /// Also print per-restart clustering statistics
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.input.exists() {
        bail!("input file does not exist: {}", args.input.display());
    }
    let fixed = args
        .palette
        .as_deref()
        .map(|list| Palette::from_hex_list(&list.split(',').map(str::trim).collect::<Vec<_>>()))
        .transpose()
        .context("invalid --palette")?;
    let colors = fixed.as_ref().map_or(args.colors, Palette::len);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, colors));

    let config = KMeansConfig::new(args.colors)
        .with_seed(args.seed)
        .with_restarts(args.restarts)
        .with_max_iterations(args.max_iter);

    info!("Reading image: {}", args.input.display());
    let buffer = open_image(&args.input)
        .with_context(|| format!("failed to read image {}", args.input.display()))?;

    let (palette, image) = match fixed {
        Some(palette) => {
            info!("Mapping pixels onto {} given colors...", palette.len());
            let image = quantize(&buffer, &palette).context("quantization failed")?;
            (palette, image)
        }
        None => {
            info!("Extracting {} main colors and mapping pixels...", args.colors);
            let result = Quantizer::new(config).run(&buffer).context("quantization failed")?;
            if args.verbose {
                for run in &result.runs {
                    println!(
                        "  restart {:>2}: {:>3} iterations, inertia {:>14.1}{}",
                        run.restart,
                        run.iterations,
                        run.inertia,
                        if run.converged { "" } else { " (iteration cap)" }
                    );
                }
                println!("  elapsed: {} ms", result.elapsed_ms);
            }
            (result.palette, result.image)
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&palette.records())?);
    } else {
        println!("Main colors:");
        for (i, color) in palette.colors.iter().enumerate() {
            println!("  Color {}: {}  {}", i + 1, color, color.to_hex());
        }
    }

    info!("Saving BMP: {}", output.display());
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save_bmp(&image, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!("Done. Output file: {}", output.display());
    Ok(())
}
