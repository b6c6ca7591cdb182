use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use icon_writer::{decode, init_logging, write_icon_set, Density, IconSetConfig, Rgb};

#[derive(Parser, Debug)]
#[command(version, about = "Write placeholder Android launcher icons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write res/mipmap-<density>/<name>.png for each density.
    Generate {
        /// TOML file with colours, densities and icon names.
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Outer colour, #RRGGBB.
        #[arg(long)]
        background: Option<Rgb>,
        /// Centre square colour, #RRGGBB.
        #[arg(long)]
        foreground: Option<Rgb>,
        #[arg(long)]
        swap: bool,
        /// Restrict output to these densities.
        #[arg(long, value_enum, value_delimiter = ',')]
        density: Vec<Density>,
    },
    /// Decode PNG files and print their chunks.
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            config,
            out,
            background,
            foreground,
            swap,
            density,
        } => {
            let mut config = match config {
                Some(path) => IconSetConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => IconSetConfig::default(),
            };
            if let Some(background) = background {
                config.background = background;
            }
            if let Some(foreground) = foreground {
                config.foreground = foreground;
            }
            config.swap_colours |= swap;
            if !density.is_empty() {
                config.densities = density;
            }

            let written = write_icon_set(&config, &out).context("writing icons")?;
            info!("All {} icons created successfully!", written.len());
        }
        Command::Inspect { files } => {
            let mut failed = 0;
            for path in &files {
                let bytes =
                    fs::read(path).with_context(|| format!("reading {}", path.display()))?;
                match decode(&bytes) {
                    Ok(image) => {
                        println!(
                            "{}: {}x{}, bit depth {}, colour type {}",
                            path.display(),
                            image.width,
                            image.height,
                            image.bit_depth,
                            image.colour_type.get_code()
                        );
                        for chunk in &image.chunks {
                            println!(
                                "  {} {:>8} bytes  crc {:08X}",
                                chunk.kind_str(),
                                chunk.size,
                                chunk.crc
                            );
                        }
                    }
                    Err(e) => {
                        error!("{}: {}", path.display(), e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{failed} of {} files failed to decode", files.len());
            }
        }
    }

    Ok(())
}
