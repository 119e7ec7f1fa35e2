// ~/src/data_loaders/screens.rs

use std::{fs, path::PathBuf, process::Command};

use serde::Deserialize;

use crate::{
    debug,
    error::{Result, StitchError},
    info,
};

/// Rectangle as reported by the screen helper. `x`/`y` may be negative for
/// monitors placed left of or above the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// One entry of the helper's JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScreenRecord {
    #[serde(default)]
    pub bits_per_pixel: Option<u32>,
    pub bounds: Rect,
    pub device_name: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub working_area: Option<Rect>,
}

/// Immutable per-run description of one monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenDescriptor {
    pub id: usize,
    pub device_name: String,
    pub bounds: Rect,
    pub is_primary: bool,
}

impl ScreenDescriptor {
    pub fn width(&self) -> u32 {
        self.bounds.width.max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.bounds.height.max(0) as u32
    }

    /// `"<width>x<height>"`, the token wallpaper file names are matched on.
    pub fn resolution_token(&self) -> String {
        format!("{}x{}", self.bounds.width, self.bounds.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenSource {
    File(PathBuf),
    Command(String),
    Native,
}

impl std::fmt::Display for ScreenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Command(cmd) => write!(f, "command `{cmd}`"),
            Self::Native => f.write_str("native enumeration"),
        }
    }
}

pub fn load_screens(source: &ScreenSource) -> Result<Vec<ScreenDescriptor>> {
    info!("[SCREENS] Loading monitor layout from {}", source);

    match source {
        ScreenSource::File(path) => {
            let raw = fs::read_to_string(path).map_err(|e| {
                StitchError::io(format!("could not read screen file {}", path.display()), e)
            })?;
            parse_screen_json(&raw)
        }
        ScreenSource::Command(cmd) => parse_screen_json(&run_helper(cmd)?),
        ScreenSource::Native => to_descriptors(native_records()?),
    }
}

pub fn parse_screen_json(raw: &str) -> Result<Vec<ScreenDescriptor>> {
    to_descriptors(parse_records(raw)?)
}

fn parse_records(raw: &str) -> Result<Vec<ScreenRecord>> {
    serde_json::from_str::<Vec<ScreenRecord>>(raw.trim())
        .map_err(|e| StitchError::ScreenSource(format!("malformed screen JSON: {e}")))
}

fn to_descriptors(records: Vec<ScreenRecord>) -> Result<Vec<ScreenDescriptor>> {
    if records.is_empty() {
        return Err(StitchError::NoScreens);
    }

    records
        .into_iter()
        .enumerate()
        .map(|(id, record)| {
            if record.bounds.width <= 0 || record.bounds.height <= 0 {
                return Err(StitchError::ScreenSource(format!(
                    "monitor \"{}\" has invalid size {}x{}",
                    record.device_name, record.bounds.width, record.bounds.height
                )));
            }

            debug!(
                "[SCREENS] #{} {} primary={} bounds=[x={},y={},w={},h={}]",
                id,
                record.device_name,
                record.primary,
                record.bounds.x,
                record.bounds.y,
                record.bounds.width,
                record.bounds.height
            );

            Ok(ScreenDescriptor {
                id,
                device_name: record.device_name,
                bounds: record.bounds,
                is_primary: record.primary,
            })
        })
        .collect()
}

fn run_helper(cmd: &str) -> Result<String> {
    let mut parts = cmd.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(StitchError::ScreenSource("empty screen helper command".to_string()));
    };

    let output = Command::new(program)
        .args(parts)
        .output()
        .map_err(|e| StitchError::io(format!("could not run screen helper `{cmd}`"), e))?;

    if !output.status.success() {
        return Err(StitchError::ScreenSource(format!(
            "screen helper `{cmd}` exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(windows)]
fn native_records() -> Result<Vec<ScreenRecord>> {
    Ok(crate::native_screens::enumerate())
}

#[cfg(not(windows))]
fn native_records() -> Result<Vec<ScreenRecord>> {
    Err(StitchError::ScreenSource(
        "native monitor enumeration is only available on Windows; use --screens or --screen-command"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    const TWO_SCREENS: &str = r#"[{"BitsPerPixel":32,"Bounds":{"X":0,"Y":0,"Width":1920,"Height":1080},"DeviceName":"\\\\.\\DISPLAY1","Primary":true,"WorkingArea":{"X":0,"Y":0,"Width":1920,"Height":1040}},{"BitsPerPixel":32,"Bounds":{"X":-1280,"Y":-200,"Width":1280,"Height":1024},"DeviceName":"\\\\.\\DISPLAY2","Primary":false,"WorkingArea":{"X":-1280,"Y":-200,"Width":1280,"Height":984}}]"#;

    #[test]
    fn parses_helper_output() {
        let screens = parse_screen_json(TWO_SCREENS).unwrap();

        assert_eq!(
            screens,
            vec![
                ScreenDescriptor {
                    id: 0,
                    device_name: r"\\.\DISPLAY1".to_string(),
                    bounds: Rect::new(0, 0, 1920, 1080),
                    is_primary: true,
                },
                ScreenDescriptor {
                    id: 1,
                    device_name: r"\\.\DISPLAY2".to_string(),
                    bounds: Rect::new(-1280, -200, 1280, 1024),
                    is_primary: false,
                },
            ]
        );
        assert_eq!(screens[1].resolution_token(), "1280x1024");
    }

    #[test]
    fn optional_fields_may_be_missing() {
        let raw = r#"[{"Bounds":{"X":0,"Y":0,"Width":800,"Height":600},"DeviceName":"A"}]"#;
        let screens = parse_screen_json(raw).unwrap();
        assert_eq!(screens.len(), 1);
        assert!(!screens[0].is_primary);
    }

    #[test]
    fn empty_list_is_fatal() {
        assert!(matches!(parse_screen_json("[]"), Err(StitchError::NoScreens)));
    }

    #[test]
    fn malformed_json_is_fatal() {
        assert!(matches!(
            parse_screen_json("{not json"),
            Err(StitchError::ScreenSource(_))
        ));
        assert!(matches!(
            parse_screen_json(r#"[{"DeviceName":"A"}]"#),
            Err(StitchError::ScreenSource(_))
        ));
    }

    #[test]
    fn zero_sized_monitor_is_fatal() {
        let raw = r#"[{"Bounds":{"X":0,"Y":0,"Width":0,"Height":600},"DeviceName":"A"}]"#;
        assert!(matches!(
            parse_screen_json(raw),
            Err(StitchError::ScreenSource(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{TWO_SCREENS}").unwrap();

        let screens = load_screens(&ScreenSource::File(file.path().to_path_buf())).unwrap();
        assert_eq!(screens.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = ScreenSource::File(PathBuf::from("/nonexistent/screens.json"));
        assert!(matches!(load_screens(&source), Err(StitchError::Io { .. })));
    }
}
