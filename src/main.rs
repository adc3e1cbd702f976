//! # Mosaico CLI
//!
//! Command-line interface for rendering identicon avatars.
//!
//! ## Usage
//!
//! ```bash
//! # Render an avatar with default settings (64x64, 8x8 grid)
//! mosaico generate "someone@example.com"
//!
//! # Bigger, finer grid, circles on a transparent-composited background
//! mosaico generate --size 512 --grid 10 --fg-shape circle --transparent -o me.png alice
//!
//! # Random input, print the grid
//! mosaico generate --random --ascii
//!
//! # Render many inputs in parallel
//! mosaico batch --out-dir avatars alice bob carol
//!
//! # List shape presets
//! mosaico shapes
//!
//! # Serve avatars over HTTP
//! mosaico serve --listen 0.0.0.0:8080
//! ```

use clap::{Args, Parser, Subcommand};
use rand::{Rng, distr::Alphanumeric};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use mosaico::{
    MosaicoError,
    avatar::{AvatarOption, Options},
    color,
    digest::{Digest, DigestEncoding, HashAlgorithm},
    export,
    render::canvas::BlockLayout,
    render::pattern::Grid,
    render::shape::ShapeMask,
    server::{self, ServerConfig},
    shapes,
};

/// Mosaico - Deterministic identicon avatars
#[derive(Parser, Debug)]
#[command(name = "mosaico")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one avatar to an image file
    Generate {
        /// Input string (user name, email, ...)
        input: Option<String>,

        /// Use a random input instead
        #[arg(long, conflicts_with = "input")]
        random: bool,

        /// Output file; the format follows the extension
        #[arg(short, long, default_value = "avatar.png")]
        output: PathBuf,

        /// Print the on/off grid to stdout
        #[arg(long)]
        ascii: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render several avatars in parallel, one PNG per input
    Batch {
        /// Input strings
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Directory to write into (created if missing)
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List shape presets
    Shapes,

    /// Serve avatars over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Largest avatar size a request may ask for
        #[arg(long, default_value = "1024")]
        max_size: u32,

        /// Largest grid a request may ask for
        #[arg(long, default_value = "128")]
        max_grid: u32,
    },
}

/// Flags shared by every rendering command.
#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON option file, applied before the flags below
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Image edge length in pixels (minimum 64)
    #[arg(long)]
    size: Option<u32>,

    /// Cells per grid edge (minimum 8)
    #[arg(long)]
    grid: Option<u32>,

    /// Background colour (#rrggbb, #rrggbbaa or r,g,b[,a])
    #[arg(long)]
    bg: Option<String>,

    /// Foreground colour (defaults to one derived from the input)
    #[arg(long)]
    fg: Option<String>,

    /// Foreground stamp: preset name or mask file (.json or 0/1 text)
    #[arg(long, value_name = "SHAPE")]
    fg_shape: Option<String>,

    /// Background stamp: preset name or mask file (.json or 0/1 text)
    #[arg(long, value_name = "SHAPE")]
    bg_shape: Option<String>,

    /// Paint the background beneath every cell
    #[arg(long)]
    transparent: bool,

    /// Truncated cell sizes instead of rounded boundaries
    #[arg(long)]
    uniform: bool,

    /// Hash function (md5, sha256)
    #[arg(long)]
    hash: Option<String>,

    /// Index ASCII codes of the hex digest (compatible with older avatars)
    #[arg(long)]
    legacy_hex: bool,
}

impl RenderArgs {
    /// Resolve defaults, then the config file, then the flags.
    fn to_options(&self) -> Result<Options, MosaicoError> {
        let options = match &self.config {
            Some(path) => Options::from_json(&fs::read_to_string(path)?)?,
            None => Options::default(),
        };

        let mut steps = Vec::new();
        if let Some(size) = self.size {
            steps.push(AvatarOption::Size(size));
        }
        if let Some(grid) = self.grid {
            steps.push(AvatarOption::GridSize(grid));
        }
        if let Some(bg) = &self.bg {
            steps.push(AvatarOption::BgColor(color::parse_color(bg)?));
        }
        if let Some(fg) = &self.fg {
            steps.push(AvatarOption::FgColor(color::parse_color(fg)?));
        }
        if let Some(shape) = &self.fg_shape {
            steps.push(AvatarOption::FgShape(load_shape(shape)?));
        }
        if let Some(shape) = &self.bg_shape {
            steps.push(AvatarOption::BgShape(load_shape(shape)?));
        }
        if self.transparent {
            steps.push(AvatarOption::Transparency(true));
        }
        if self.uniform {
            steps.push(AvatarOption::Layout(BlockLayout::Uniform));
        }
        if let Some(name) = &self.hash {
            let hash = HashAlgorithm::from_name(name)
                .ok_or_else(|| MosaicoError::Config(format!("Unknown hash '{}'", name)))?;
            steps.push(AvatarOption::Hash(hash));
        }
        if self.legacy_hex {
            steps.push(AvatarOption::Encoding(DigestEncoding::HexAscii));
        }

        Ok(options.apply_all(steps))
    }
}

/// Resolve a shape argument: a preset name, or a path to a mask file.
fn load_shape(arg: &str) -> Result<Option<ShapeMask>, MosaicoError> {
    if let Some(mask) = shapes::by_name(arg) {
        return Ok(Some(mask));
    }

    let path = Path::new(arg);
    if !path.exists() {
        return Err(MosaicoError::Config(format!(
            "'{}' is neither a shape preset ({}) nor a file",
            arg,
            shapes::SHAPES.join(", ")
        )));
    }

    let text = fs::read_to_string(path)?;
    let mask = if path.extension().is_some_and(|ext| ext == "json") {
        let rows: Vec<Vec<i32>> = serde_json::from_str(&text)
            .map_err(|e| MosaicoError::Config(format!("Invalid mask {}: {}", arg, e)))?;
        ShapeMask::from_rows(&rows)
    } else {
        ShapeMask::parse(&text)
    };

    if mask.is_none() {
        log::warn!("mask {} is empty or not rectangular, using solid blocks", arg);
    }
    Ok(mask)
}

/// File name for a batch input: anything outside `[A-Za-z0-9._-]` becomes `_`.
fn file_stem(input: &str) -> String {
    let stem: String = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

/// Output file name for each distinct batch input.
///
/// Inputs whose stems collide get a short digest suffix, so no avatar in a
/// batch overwrites another.
fn batch_names(inputs: &[String]) -> Result<Vec<(String, String)>, MosaicoError> {
    let mut seen = HashSet::new();
    let unique: Vec<&String> = inputs
        .iter()
        .filter(|input| seen.insert(input.as_str()))
        .collect();

    let mut stems: HashMap<String, usize> = HashMap::new();
    for input in &unique {
        *stems.entry(file_stem(input)).or_default() += 1;
    }

    let mut names = HashSet::new();
    let mut out = Vec::with_capacity(unique.len());
    for input in unique {
        let stem = file_stem(input);
        let name = if stems[&stem] > 1 {
            let hex = Digest::derive(input, HashAlgorithm::Md5, DigestEncoding::Raw).to_hex();
            format!("{}-{}.png", stem, &hex[..8])
        } else {
            format!("{}.png", stem)
        };
        if !names.insert(name.clone()) {
            return Err(MosaicoError::Config(format!(
                "Two inputs map to the output file {}",
                name
            )));
        }
        out.push((input.clone(), name));
    }
    Ok(out)
}

fn random_input() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), MosaicoError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            random,
            output,
            ascii,
            render,
        } => {
            let input = match input {
                Some(input) => input,
                None if random => {
                    let input = random_input();
                    println!("Random input: {}", input);
                    input
                }
                None => {
                    return Err(MosaicoError::Config(
                        "Provide an INPUT or pass --random".to_string(),
                    ));
                }
            };

            let options = render.to_options()?;

            if ascii {
                let digest = Digest::derive(&input, options.hash(), options.encoding());
                print!("{}", Grid::compose(&digest, options.grid_size()).to_ascii());
            }

            let canvas = options.render(&input);
            export::save(&canvas, &output)?;
            println!(
                "Saved {}x{} avatar to {}",
                canvas.width(),
                canvas.height(),
                output.display()
            );
        }

        Commands::Batch {
            inputs,
            out_dir,
            render,
        } => {
            let options = render.to_options()?;
            let jobs = batch_names(&inputs)?;
            fs::create_dir_all(&out_dir)?;

            let failures: Vec<(String, MosaicoError)> = jobs
                .par_iter()
                .filter_map(|(input, name)| {
                    let path = out_dir.join(name);
                    let canvas = options.render(input);
                    match export::save(&canvas, &path) {
                        Ok(()) => {
                            println!("Saved {}", path.display());
                            None
                        }
                        Err(e) => Some((input.clone(), e)),
                    }
                })
                .collect();

            for (input, e) in &failures {
                eprintln!("Failed {}: {}", input, e);
            }
            if !failures.is_empty() {
                return Err(MosaicoError::Image(format!(
                    "{} of {} avatars failed",
                    failures.len(),
                    jobs.len()
                )));
            }
        }

        Commands::Shapes => {
            println!("Available shapes:");
            for name in shapes::SHAPES {
                println!("  {}", name);
            }
        }

        Commands::Serve {
            listen,
            max_size,
            max_grid,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                max_size,
                max_grid,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}
