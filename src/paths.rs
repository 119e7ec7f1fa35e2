// ~/src/paths.rs

use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "wallpaper-stitcher";
const CONFIG_FILE_NAME: &str = "wallpaper-stitcher.yaml";
const LOG_FILE_NAME: &str = "wallpaper-stitcher.log";

pub fn user_home_dir() -> Option<PathBuf> {
    // Windows first, then the HOMEDRIVE/HOMEPATH pair, then unix.
    if let Ok(profile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(profile));
    }

    let drive = std::env::var("HOMEDRIVE").ok();
    let path = std::env::var("HOMEPATH").ok();
    if let (Some(d), Some(p)) = (drive, path) {
        return Some(PathBuf::from(format!("{}{}", d, p)));
    }

    std::env::var("HOME").ok().map(PathBuf::from)
}

/// `~/.config/wallpaper-stitcher/`
pub fn user_config_dir() -> Option<PathBuf> {
    user_home_dir().map(|home| home.join(".config").join(APP_NAME))
}

/// Config files tried when none is given explicitly, most specific first.
pub fn config_candidates(source_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![source_dir.join(CONFIG_FILE_NAME)];
    if let Some(dir) = user_config_dir() {
        candidates.push(dir.join("config.yaml"));
    }
    candidates
}

pub fn find_config(source_dir: &Path) -> Option<PathBuf> {
    config_candidates(source_dir).into_iter().find(|p| p.is_file())
}

pub fn default_log_path() -> PathBuf {
    match user_config_dir() {
        Some(dir) if dir.is_dir() => dir.join(LOG_FILE_NAME),
        _ => PathBuf::from(LOG_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn source_dir_config_wins() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(find_config(dir.path()), Some(dir.path().join(CONFIG_FILE_NAME)));
        assert_eq!(config_candidates(dir.path())[0], dir.path().join(CONFIG_FILE_NAME));
    }
}
