// Command-line arguments.

use clap::{Args, Parser, Subcommand};
use hue_swap::Rgb;
use std::path::PathBuf;

/// Parse and validate threshold (0.0-1.0)
fn parse_threshold(s: &str) -> Result<f32, String> {
    let t: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=1.0).contains(&t) {
        return Err(format!("Threshold must be between 0.0 and 1.0, got {}", t));
    }
    Ok(t)
}

/// Parse a #rrggbb color
fn parse_color(s: &str) -> Result<Rgb, String> {
    s.parse::<Rgb>().map_err(|e| e.to_string())
}

/// Parse and validate resolution (WIDTHxHEIGHT format)
fn parse_resolution(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s.split_once('x').ok_or_else(|| {
        format!("Invalid resolution format '{}'. Use WIDTHxHEIGHT (e.g., 640x480)", s)
    })?;
    let width: u32 = w.parse().map_err(|_| format!("Invalid width '{}' in resolution", w))?;
    let height: u32 = h.parse().map_err(|_| format!("Invalid height '{}' in resolution", h))?;
    if width == 0 || height == 0 {
        return Err("Resolution width and height must be greater than 0".to_string());
    }
    Ok((width, height))
}

/// hue-swap: swap one hue for another on a live camera feed
#[derive(Parser, Debug)]
#[command(name = "hue-swap", version)]
#[command(about = "Swap one hue for another on a live camera feed")]
#[command(after_help = "EXAMPLES:
    # Turn red things green (defaults)
    hue-swap

    # Turn blue things orange, wider match
    hue-swap live --mask '#0000ff' --replace '#ff8000' --threshold 0.15

    # Recolor a still image
    hue-swap still -i photo.png -o out.png --mask '#ff0000' --replace '#0000ff'

CONTROLS (live):
    Click       Pick mask hue under the cursor
    Left/Right  Rotate replace hue
    Up/Down     Raise/lower threshold
    Space       Toggle bypass
    R           Reset to configured colors
    Esc         Quit")]
pub struct Cli {
    /// Config file (default: <config dir>/hue-swap/config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the camera and show the recolored feed (default)
    Live(LiveArgs),
    /// Recolor one image file
    Still(StillArgs),
}

/// Color options shared by both commands; unset ones come from the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct EffectArgs {
    /// Color whose hue is replaced (#rrggbb)
    #[arg(long, short = 'm', value_parser = parse_color)]
    pub mask: Option<Rgb>,

    /// Color whose hue is rotated to (#rrggbb)
    #[arg(long, short = 'r', value_parser = parse_color)]
    pub replace: Option<Rgb>,

    /// Hue distance cutoff (0.0-1.0; 0.5 and above matches every hue)
    #[arg(long, short = 't', value_parser = parse_threshold)]
    pub threshold: Option<f32>,

    /// Process each frame on one thread
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Args, Debug, Default)]
pub struct LiveArgs {
    /// Camera device index
    #[arg(long)]
    pub camera: Option<u32>,

    /// Requested capture resolution, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_resolution)]
    pub resolution: Option<(u32, u32)>,

    #[command(flatten)]
    pub effect: EffectArgs,
}

#[derive(Args, Debug)]
pub struct StillArgs {
    /// Input image
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Output image (format from extension)
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    #[command(flatten)]
    pub effect: EffectArgs,
}
