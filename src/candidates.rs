use std::{fs, path::Path};

use crate::{
    data_loaders::screens::ScreenDescriptor,
    error::{Result, StitchError},
    formats::format_for_file,
};

/// Names of every recognized image file directly inside `dir` (symlinks
/// followed), sorted by name. An empty result is a configuration error.
pub fn list_images(dir: &Path) -> Result<Vec<String>> {
    let read_dir = fs::read_dir(dir)
        .map_err(|e| StitchError::io(format!("could not list folder {}", dir.display()), e))?;

    let mut images: Vec<String> = read_dir
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| format_for_file(name).is_some())
        .collect();

    if images.is_empty() {
        return Err(StitchError::NoImages(dir.to_path_buf()));
    }

    images.sort();
    Ok(images)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    Missing,
    Unique(String),
    Ambiguous(Vec<String>),
}

impl From<Vec<String>> for Candidates {
    fn from(mut matches: Vec<String>) -> Self {
        match matches.len() {
            0 => Self::Missing,
            1 => Self::Unique(matches.remove(0)),
            _ => Self::Ambiguous(matches),
        }
    }
}

/// Files whose name contains the screen's `"<w>x<h>"` token, ignoring case,
/// in listing order.
pub fn find_candidates(images: &[String], screen: &ScreenDescriptor) -> Candidates {
    let token = screen.resolution_token().to_lowercase();

    images
        .iter()
        .filter(|name| name.to_lowercase().contains(&token))
        .cloned()
        .collect::<Vec<_>>()
        .into()
}
