use std::path::Path;

use image::{imageops, imageops::FilterType, ImageReader, RgbImage};

use crate::{
    data_loaders::screens::ScreenDescriptor,
    error::{Result, StitchError},
    formats::format_for_file,
    info,
    layout::{CanvasSize, Placement},
};

/// Decodes `path` with the codec its extension maps to.
pub fn load_source(path: &Path) -> Result<RgbImage> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = format_for_file(&name).ok_or_else(|| StitchError::UnsupportedImage(name.clone()))?;

    let mut reader = ImageReader::open(path)
        .map_err(|e| StitchError::io(format!("could not open {}", path.display()), e))?;
    reader.set_format(format);

    let decoded = reader.decode().map_err(|source| StitchError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(decoded.to_rgb8())
}

pub fn size_matches(source: &RgbImage, screen: &ScreenDescriptor) -> bool {
    source.dimensions() == (screen.width(), screen.height())
}

pub fn scale_to_screen(source: &RgbImage, screen: &ScreenDescriptor, filter: FilterType) -> RgbImage {
    info!(
        "[COMPOSITE] Scaling {}x{} -> {}x{} ({:?})",
        source.width(),
        source.height(),
        screen.width(),
        screen.height(),
        filter
    );
    imageops::resize(source, screen.width(), screen.height(), filter)
}

/// The output image. Starts black; each monitor's wallpaper is copied in
/// once, in monitor order.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            image: RgbImage::new(size.width, size.height),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Copies `source` to the placement's position. Rows past the bottom edge
    /// continue at row 0. The copied area is the monitor's declared size; a
    /// smaller source leaves the rest untouched and a larger one is cropped.
    pub fn composite(&mut self, source: &RgbImage, screen: &ScreenDescriptor, placement: Placement) {
        let width = screen.width();

        copy_block(
            &mut self.image,
            source,
            (placement.dst_x, placement.dst_y),
            0,
            (width, placement.height_upper_part),
        );
        copy_block(
            &mut self.image,
            source,
            (placement.dst_x, 0),
            placement.height_upper_part,
            (width, placement.height_lower_part),
        );
    }
}

/// Copies the `size` block starting at row `src_y` of `src` to `dst` at
/// `dst_pos`, clipped to both images.
fn copy_block(dst: &mut RgbImage, src: &RgbImage, dst_pos: (u32, u32), src_y: u32, size: (u32, u32)) {
    let width = size.0.min(src.width());
    let height = size.1.min(src.height().saturating_sub(src_y));
    if width == 0 || height == 0 {
        return;
    }

    let block = imageops::crop_imm(src, 0, src_y, width, height).to_image();
    imageops::replace(dst, &block, dst_pos.0 as i64, dst_pos.1 as i64);
}
