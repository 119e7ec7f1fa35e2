use std::path::PathBuf;

use clap::Parser;

use crate::data_loaders::config::PromptMode;

/// Looks up the wallpaper for every connected monitor (by its resolution in
/// the file name, e.g. `wallpaper-1920x1080.jpg`) and stitches them into one
/// tiling wallpaper laid out like the monitors on the desktop.
#[derive(Debug, Default, Parser)]
#[command(name = "wallpaper-stitcher", version, about)]
pub struct Cli {
    /// Folder containing the per-monitor wallpapers [default: current folder]
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Output format: bmp, dib, gif, jfif, jpe, jpeg, jpg or png [default: jpg]
    #[arg(short = 'f', long = "format")]
    pub format: Option<String>,

    /// Output file [default: ./merged-wallpaper.<format>]
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// YAML config file
    #[arg(long, env = "WALLPAPER_STITCHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read the monitor layout (screeninfo JSON) from a file
    #[arg(long, value_name = "FILE")]
    pub screens: Option<PathBuf>,

    /// Run this command and read the monitor layout JSON from its output
    #[arg(long, value_name = "CMD")]
    pub screen_command: Option<String>,

    /// Resample filter used when scaling: nearest, triangle, catmullrom, gaussian, lanczos3
    #[arg(long)]
    pub filter: Option<String>,

    /// Scale wallpapers whose size does not match their monitor: ask, always, never
    #[arg(long)]
    pub scale: Option<PromptMode>,

    /// Replace an existing output file: ask, always, never
    #[arg(long)]
    pub overwrite: Option<PromptMode>,

    /// JPEG output quality (1-100)
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    /// Log everything down to debug level
    #[arg(long)]
    pub debug: bool,

    /// Log level: error, warn, info, debug
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file [default: ~/.config/wallpaper-stitcher/wallpaper-stitcher.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
