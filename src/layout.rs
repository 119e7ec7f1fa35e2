//! Canvas sizing and per-monitor placement.
//!
//! Monitor coordinates are relative to the primary display's top-left corner,
//! so they can be negative. Instead of shifting everything to a new origin,
//! negative coordinates wrap to the far edge of the canvas. Because the
//! resulting image is used as a *tiling* wallpaper, a monitor that sits
//! above the primary one is drawn at the bottom of the canvas and any part
//! that overflows is continued from row 0.
//!
//! Only vertical overflow is split. A layout whose wrapped monitor overflows
//! the right edge is clipped there.

use crate::{
    data_loaders::screens::ScreenDescriptor,
    error::{Result, StitchError},
    info,
};

/// Running bounding box over all monitor rectangles. Seeded at the origin,
/// so the point (0,0) is always part of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Edges {
    pub fn include(mut self, screen: &ScreenDescriptor) -> Self {
        let b = screen.bounds;
        self.left = self.left.min(b.x as i64);
        self.right = self.right.max(b.x as i64 + b.width as i64);
        self.top = self.top.min(b.y as i64);
        self.bottom = self.bottom.max(b.y as i64 + b.height as i64);
        self
    }

    pub fn fold(screens: &[ScreenDescriptor]) -> Self {
        screens.iter().fold(Self::default(), Self::include)
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Where one monitor's image lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub dst_x: u32,
    pub dst_y: u32,
    /// Rows copied from `dst_y` down to the bottom edge.
    pub height_upper_part: u32,
    /// Remaining rows, continued from row 0.
    pub height_lower_part: u32,
}

pub fn compute_canvas_size(screens: &[ScreenDescriptor]) -> Result<CanvasSize> {
    let edges = Edges::fold(screens);
    let (width, height) = (edges.width(), edges.height());

    if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
        return Err(StitchError::DegenerateCanvas { width, height });
    }

    Ok(CanvasSize {
        width: width as u32,
        height: height as u32,
    })
}

pub fn compute_placement(screen: &ScreenDescriptor, canvas: CanvasSize) -> Placement {
    let b = screen.bounds;
    let wrap = |pos: i32, extent: u32| -> u32 {
        let pos = pos as i64;
        let wrapped = if pos < 0 { pos + extent as i64 } else { pos };
        wrapped.clamp(0, extent as i64) as u32
    };

    let dst_x = wrap(b.x, canvas.width);
    let dst_y = wrap(b.y, canvas.height);

    let height = screen.height();
    let height_upper_part = (canvas.height - dst_y).min(height);

    Placement {
        dst_x,
        dst_y,
        height_upper_part,
        height_lower_part: height - height_upper_part,
    }
}

/// Canvas size plus every monitor's placement, computed once per run so all
/// placements share the same normalization. `placements[i]` belongs to
/// `screens[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub canvas: CanvasSize,
    pub placements: Vec<Placement>,
}

impl Layout {
    pub fn new(screens: &[ScreenDescriptor]) -> Result<Self> {
        let canvas = compute_canvas_size(screens)?;
        info!("[LAYOUT] Canvas {}x{} for {} monitor(s)", canvas.width, canvas.height, screens.len());

        let placements = screens
            .iter()
            .map(|screen| {
                let placement = compute_placement(screen, canvas);
                info!(
                    "[LAYOUT] {}{} -> dst=({}, {}) upper={} lower={}",
                    screen.device_name,
                    if screen.is_primary { " (primary)" } else { "" },
                    placement.dst_x,
                    placement.dst_y,
                    placement.height_upper_part,
                    placement.height_lower_part
                );
                placement
            })
            .collect();

        Ok(Self { canvas, placements })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::data_loaders::screens::Rect;

    fn screen(id: usize, x: i32, y: i32, w: i32, h: i32) -> ScreenDescriptor {
        ScreenDescriptor {
            id,
            device_name: format!("DISPLAY{}", id + 1),
            bounds: Rect::new(x, y, w, h),
            is_primary: x == 0 && y == 0,
        }
    }

    #[test]
    fn side_by_side_monitors() {
        let screens = [screen(0, 0, 0, 1920, 1080), screen(1, 1920, 0, 1920, 1080)];
        let layout = Layout::new(&screens).unwrap();

        assert_eq!(layout.canvas, CanvasSize { width: 3840, height: 1080 });
        assert_eq!(
            layout.placements,
            vec![
                Placement { dst_x: 0, dst_y: 0, height_upper_part: 1080, height_lower_part: 0 },
                Placement { dst_x: 1920, dst_y: 0, height_upper_part: 1080, height_lower_part: 0 },
            ]
        );
    }

    #[test]
    fn left_monitor_wraps_to_right_edge() {
        let screens = [screen(0, -1920, 0, 1920, 1080), screen(1, 0, 0, 1920, 1080)];
        let layout = Layout::new(&screens).unwrap();

        assert_eq!(layout.canvas, CanvasSize { width: 3840, height: 1080 });
        assert_eq!(layout.placements[0].dst_x, 1920);
        assert_eq!(layout.placements[1].dst_x, 0);
    }

    #[test]
    fn negative_offset_wraps_by_canvas_width() {
        let canvas = CanvasSize { width: 1920, height: 1080 };
        let placement = compute_placement(&screen(0, -500, 0, 1920, 1080), canvas);
        assert_eq!(placement.dst_x, 1420);
        assert_eq!(placement.dst_y, 0);
    }

    #[test]
    fn monitor_above_is_split_vertically() {
        // 1280x1024 monitor sitting 200px above the primary's top edge.
        let screens = [screen(0, 0, 0, 1920, 1080), screen(1, -1280, -200, 1280, 1024)];
        let layout = Layout::new(&screens).unwrap();

        assert_eq!(layout.canvas, CanvasSize { width: 3200, height: 1280 });
        assert_eq!(
            layout.placements[1],
            Placement { dst_x: 1920, dst_y: 1080, height_upper_part: 200, height_lower_part: 824 }
        );
        assert_eq!(
            layout.placements[0],
            Placement { dst_x: 0, dst_y: 0, height_upper_part: 1080, height_lower_part: 0 }
        );
    }

    #[test]
    fn taller_canvas_never_splits_unwrapped_monitor() {
        let screens = [screen(0, 0, 0, 1920, 1080), screen(1, 1920, -1080, 1080, 1920)];
        let layout = Layout::new(&screens).unwrap();

        assert_eq!(layout.canvas, CanvasSize { width: 3000, height: 2160 });
        assert_eq!(layout.placements[0].height_upper_part, 1080);
        assert_eq!(layout.placements[0].height_lower_part, 0);
        assert_eq!(
            layout.placements[1],
            Placement { dst_x: 1920, dst_y: 1080, height_upper_part: 1080, height_lower_part: 840 }
        );
    }

    #[test]
    fn all_negative_layout_stays_anchored_at_origin() {
        // No monitor touches (0,0); the origin still stretches the canvas.
        let screens = [screen(0, -3000, 0, 1920, 1080)];
        let layout = Layout::new(&screens).unwrap();

        assert_eq!(layout.canvas, CanvasSize { width: 3000, height: 1080 });
        assert_eq!(layout.placements[0].dst_x, 0);

        let edges = Edges::fold(&screens);
        assert_eq!(edges, Edges { left: -3000, right: 0, top: 0, bottom: 1080 });
    }

    #[test]
    fn empty_layout_is_degenerate() {
        assert!(matches!(
            compute_canvas_size(&[]),
            Err(StitchError::DegenerateCanvas { width: 0, height: 0 })
        ));
    }

    #[test]
    fn layout_is_idempotent() {
        let screens = [screen(0, 0, 0, 2560, 1440), screen(1, -1920, 300, 1920, 1080)];
        assert_eq!(Layout::new(&screens).unwrap(), Layout::new(&screens).unwrap());
    }

    fn arb_screens() -> impl Strategy<Value = Vec<ScreenDescriptor>> {
        prop::collection::vec((-8000i32..8000, -8000i32..8000, 1i32..5000, 1i32..5000), 1..6)
            .prop_map(|rects| {
                rects
                    .into_iter()
                    .enumerate()
                    .map(|(id, (x, y, w, h))| screen(id, x, y, w, h))
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn canvas_is_positive_and_contains_origin(screens in arb_screens()) {
            let edges = Edges::fold(&screens);
            prop_assert!(edges.width() > 0);
            prop_assert!(edges.height() > 0);
            prop_assert!(edges.left <= 0 && 0 <= edges.right);
            prop_assert!(edges.top <= 0 && 0 <= edges.bottom);
        }

        #[test]
        fn placements_stay_on_canvas(screens in arb_screens()) {
            let layout = Layout::new(&screens).unwrap();
            for (screen, placement) in screens.iter().zip(&layout.placements) {
                prop_assert!(placement.dst_x < layout.canvas.width);
                prop_assert!(placement.dst_y < layout.canvas.height);
                prop_assert_eq!(
                    placement.height_upper_part + placement.height_lower_part,
                    screen.height()
                );
            }
        }
    }
}
