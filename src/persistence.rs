use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{codecs::jpeg::JpegEncoder, ImageFormat, RgbImage};

use crate::{
    error::{Result, StitchError},
    formats::format_for_extension,
    info,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub format: ImageFormat,
    pub jpeg_quality: u8,
}

impl OutputTarget {
    /// Fails for an extension outside the recognized set.
    pub fn new(path: impl Into<PathBuf>, extension: &str, jpeg_quality: u8) -> Result<Self> {
        let format = format_for_extension(extension)
            .ok_or_else(|| StitchError::UnsupportedOutputFormat(extension.to_string()))?;

        Ok(Self {
            path: path.into(),
            format,
            jpeg_quality: jpeg_quality.clamp(1, 100),
        })
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Encodes the whole image in memory first so a failed encode never leaves a
/// truncated file behind.
pub fn encode(canvas: &RgbImage, target: &OutputTarget) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    let encoded = match target.format {
        ImageFormat::Jpeg => {
            canvas.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, target.jpeg_quality))
        }
        format => canvas.write_to(&mut bytes, format),
    };

    encoded.map_err(|source| StitchError::Encode {
        path: target.path.clone(),
        source,
    })?;

    Ok(bytes.into_inner())
}

pub fn save(canvas: &RgbImage, target: &OutputTarget) -> Result<()> {
    let bytes = encode(canvas, target)?;
    write_file(&target.path, &bytes)?;

    info!(
        "[SAVE] Wrote {}x{} {:?} ({} bytes) to {}",
        canvas.width(),
        canvas.height(),
        target.format,
        bytes.len(),
        target.path.display()
    );
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)
        .map_err(|e| StitchError::io(format!("could not save file to {}", path.display()), e))
}
