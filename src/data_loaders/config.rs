use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use image::imageops::FilterType;
use serde_yaml::{Mapping, Value};

use super::{screens::ScreenSource, yaml::load_yaml};
use crate::{
    cli::Cli,
    error::{Result, StitchError},
    paths::default_log_path,
};

#[derive(Debug, Clone)]
pub struct StitcherConfig {
    pub directory: PathBuf,
    pub format: String,
    pub output: Option<PathBuf>,
    pub screens: ScreenSettings,
    pub scaling: ScalingSettings,
    pub overwrite: PromptMode,
    pub jpeg_quality: u8,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ScreenSettings {
    pub file: Option<PathBuf>,
    pub command: Option<String>,
    pub native: bool,
}

#[derive(Debug, Clone)]
pub struct ScalingSettings {
    pub filter: FilterType,
    pub mode: PromptMode,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub debug: bool,
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for StitcherConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: "jpg".to_string(),
            output: None,
            screens: ScreenSettings::default(),
            scaling: ScalingSettings::default(),
            overwrite: PromptMode::Ask,
            jpeg_quality: 75,
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            file: None,
            command: None,
            native: cfg!(windows),
        }
    }
}

impl Default for ScalingSettings {
    fn default() -> Self {
        Self {
            filter: FilterType::CatmullRom,
            mode: PromptMode::Ask,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            debug: false,
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// How a yes/no style question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Ask,
    Always,
    Never,
}

impl PromptMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ask" | "prompt" | "interactive" => Some(Self::Ask),
            "always" | "yes" | "true" | "auto" => Some(Self::Always),
            "never" | "no" | "false" | "off" => Some(Self::Never),
            _ => None,
        }
    }
}

impl FromStr for PromptMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("expected ask, always or never, got '{s}'"))
    }
}

pub fn parse_filter(value: &str) -> Option<FilterType> {
    match value.trim().to_lowercase().as_str() {
        "nearest" => Some(FilterType::Nearest),
        "triangle" | "linear" | "bilinear" => Some(FilterType::Triangle),
        "catmullrom" | "catmull-rom" | "cubic" | "bicubic" => Some(FilterType::CatmullRom),
        "gaussian" => Some(FilterType::Gaussian),
        "lanczos3" | "lanczos" => Some(FilterType::Lanczos3),
        _ => None,
    }
}

impl StitcherConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let value = load_yaml(path)?;
        Self::from_yaml(&value).map_err(|reason| StitchError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_yaml(root: &Value) -> std::result::Result<Self, String> {
        let mut config = Self::default();
        let Some(map) = root.as_mapping() else {
            return if root.is_null() {
                Ok(config)
            } else {
                Err("top level must be a mapping".to_string())
            };
        };

        if let Some(dir) = str_any(map, &["directory", "dir", "source_dir"]) {
            config.directory = PathBuf::from(dir);
        }
        if let Some(format) = str_any(map, &["format", "output_format", "extension"]) {
            config.format = format.trim().trim_start_matches('.').to_string();
        }
        if let Some(output) = str_any(map, &["output", "output_path"]) {
            config.output = Some(PathBuf::from(output));
        }

        if let Some(screens) = mapping_at(map, "screens") {
            config.screens.file = str_at(screens, "file").map(PathBuf::from);
            config.screens.command = str_any(screens, &["command", "helper"]).map(str::to_string);
            config.screens.native = bool_at(screens, "native").unwrap_or(config.screens.native);
        }

        if let Some(scaling) = mapping_at(map, "scaling") {
            if let Some(filter) = str_at(scaling, "filter") {
                config.scaling.filter =
                    parse_filter(filter).ok_or_else(|| format!("unknown scaling filter '{filter}'"))?;
            }
            if let Some(mode) = prompt_mode_at(scaling, "mode")? {
                config.scaling.mode = mode;
            }
        }

        if let Some(mode) = prompt_mode_at(map, "overwrite")? {
            config.overwrite = mode;
        }

        config.jpeg_quality = u64_at(map, "jpeg_quality")
            .map(|q| q.clamp(1, 100) as u8)
            .unwrap_or(config.jpeg_quality);

        config.logging.debug = bool_at(map, "debug").unwrap_or(config.logging.debug);
        config.logging.level = str_at(map, "log_level")
            .unwrap_or(&config.logging.level)
            .to_lowercase();
        config.logging.file = str_at(map, "log_file").map(PathBuf::from);

        Ok(config)
    }

    /// Command-line flags override whatever the file said.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(dir) = &cli.dir {
            self.directory = dir.clone();
        }
        if let Some(format) = &cli.format {
            self.format = format.trim().trim_start_matches('.').to_string();
        }
        if let Some(output) = &cli.output {
            self.output = Some(output.clone());
        }
        if let Some(file) = &cli.screens {
            self.screens.file = Some(file.clone());
        }
        if let Some(command) = &cli.screen_command {
            self.screens.command = Some(command.clone());
        }
        if let Some(filter) = &cli.filter {
            self.scaling.filter = parse_filter(filter).ok_or_else(|| StitchError::Config {
                path: PathBuf::from("--filter"),
                reason: format!("unknown scaling filter '{filter}'"),
            })?;
        }
        if let Some(mode) = cli.scale {
            self.scaling.mode = mode;
        }
        if let Some(mode) = cli.overwrite {
            self.overwrite = mode;
        }
        if let Some(quality) = cli.jpeg_quality {
            self.jpeg_quality = quality.clamp(1, 100);
        }
        if cli.debug {
            self.logging.debug = true;
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.to_lowercase();
        }
        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("./merged-wallpaper.{}", self.format)))
    }

    pub fn log_path(&self) -> PathBuf {
        self.logging.file.clone().unwrap_or_else(default_log_path)
    }

    /// File beats command beats native enumeration.
    pub fn screen_source(&self) -> Result<ScreenSource> {
        if let Some(file) = &self.screens.file {
            return Ok(ScreenSource::File(file.clone()));
        }
        if let Some(command) = &self.screens.command {
            return Ok(ScreenSource::Command(command.clone()));
        }
        if self.screens.native {
            return Ok(ScreenSource::Native);
        }
        Err(StitchError::ScreenSource(
            "no screen source configured; use --screens <file> or --screen-command <cmd>".to_string(),
        ))
    }
}

fn bool_at(map: &Mapping, key: &str) -> Option<bool> {
    map.get(Value::String(key.to_string()))?.as_bool()
}

fn str_at<'a>(map: &'a Mapping, key: &str) -> Option<&'a str> {
    map.get(Value::String(key.to_string()))?.as_str()
}

fn str_any<'a>(map: &'a Mapping, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| str_at(map, k))
}

fn mapping_at<'a>(map: &'a Mapping, key: &str) -> Option<&'a Mapping> {
    map.get(Value::String(key.to_string()))?.as_mapping()
}

fn u64_at(map: &Mapping, key: &str) -> Option<u64> {
    map.get(Value::String(key.to_string()))?
        .as_i64()
        .and_then(|v| if v >= 0 { Some(v as u64) } else { None })
}

/// YAML turns bare `yes`/`no` into booleans, so those are accepted too.
fn prompt_mode_at(map: &Mapping, key: &str) -> std::result::Result<Option<PromptMode>, String> {
    match map.get(Value::String(key.to_string())) {
        None => Ok(None),
        Some(Value::Bool(true)) => Ok(Some(PromptMode::Always)),
        Some(Value::Bool(false)) => Ok(Some(PromptMode::Never)),
        Some(Value::String(s)) => PromptMode::parse(s)
            .map(Some)
            .ok_or_else(|| format!("invalid value '{s}' for {key}")),
        Some(other) => Err(format!("invalid value {other:?} for {key}")),
    }
}
