use std::path::Path;

use image::ImageFormat;

/// Recognized file extensions and the codec each one maps to.
pub const EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("bmp", ImageFormat::Bmp),
    ("dib", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
    ("jfif", ImageFormat::Jpeg),
    ("jpe", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("jpg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
];

pub fn format_for_extension(ext: &str) -> Option<ImageFormat> {
    EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, format)| *format)
}

/// The part after the last dot, if any.
pub fn extension_of(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|ext| ext.to_str())
}

pub fn format_for_file(file_name: &str) -> Option<ImageFormat> {
    extension_of(file_name).and_then(format_for_extension)
}
