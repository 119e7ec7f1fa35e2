//! One stitching run: resolve a wallpaper per monitor, paste it onto the
//! canvas, write the result.
//!
//! Monitors are processed strictly in the order the screen source reported
//! them so prompts appear in a predictable sequence.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use image::RgbImage;

use crate::{
    candidates::{find_candidates, list_images, Candidates},
    compositor::{load_source, scale_to_screen, size_matches, Canvas},
    data_loaders::{
        config::{PromptMode, StitcherConfig},
        screens::ScreenDescriptor,
    },
    error::Result,
    info,
    layout::Layout,
    menu::{Menu, Prompter},
    persistence::{save, OutputTarget},
    warn,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(PathBuf),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mismatch {
    Scale,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overwrite {
    Replace,
    Cancel,
}

pub struct Stitcher<'a, R, W> {
    config: &'a StitcherConfig,
    prompter: &'a mut Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Stitcher<'a, R, W> {
    pub fn new(config: &'a StitcherConfig, prompter: &'a mut Prompter<R, W>) -> Self {
        Self { config, prompter }
    }

    pub fn run(&mut self, screens: &[ScreenDescriptor]) -> Result<Outcome> {
        // Configuration problems surface before anything is asked.
        let target = OutputTarget::new(
            self.config.output_path(),
            &self.config.format,
            self.config.jpeg_quality,
        )?;
        let images = list_images(&self.config.directory)?;
        info!(
            "[STITCH] {} image(s) in {}",
            images.len(),
            self.config.directory.display()
        );

        let layout = Layout::new(screens)?;
        let mut canvas = Canvas::new(layout.canvas);

        for (screen, &placement) in screens.iter().zip(&layout.placements) {
            let file = self.resolve_wallpaper(screen, &images)?;
            self.prompter.println(&format!(
                "Using {} for display \"{}\" ({})",
                file,
                screen.device_name,
                screen.resolution_token()
            ))?;

            let source = self.load_fitted(&file, screen)?;
            canvas.composite(&source, screen, placement);
        }

        if target.exists() && self.confirm_overwrite(&target)? == Overwrite::Cancel {
            warn!("[STITCH] Kept existing {}; nothing written", target.path.display());
            return Ok(Outcome::Cancelled);
        }

        save(canvas.image(), &target)?;
        self.prompter
            .println(&format!("Saved file to {}", target.path.display()))?;

        Ok(Outcome::Saved(target.path))
    }

    fn resolve_wallpaper(&mut self, screen: &ScreenDescriptor, images: &[String]) -> Result<String> {
        let token = screen.resolution_token();

        match find_candidates(images, screen) {
            Candidates::Unique(file) => Ok(file),
            Candidates::Missing => {
                info!("[STITCH] No candidate for {} ({})", screen.device_name, token);
                self.prompter.println(&format!(
                    "Could not find an image for screen \"{}\" ({})",
                    screen.device_name, token
                ))?;
                self.prompter
                    .choose_from_list(images, "Please choose an alternative image:")
                    .map(str::to_string)
            }
            Candidates::Ambiguous(matches) => {
                info!(
                    "[STITCH] {} candidates for {} ({})",
                    matches.len(),
                    screen.device_name,
                    token
                );
                let message = format!(
                    "there are multiple options for screen \"{}\" ({}):",
                    screen.device_name, token
                );
                self.prompter
                    .choose_from_list(&matches, &message)
                    .map(str::to_string)
            }
        }
    }

    fn load_fitted(&mut self, file: &str, screen: &ScreenDescriptor) -> Result<RgbImage> {
        let source = load_source(&self.config.directory.join(file))?;
        if size_matches(&source, screen) {
            return Ok(source);
        }

        let choice = match self.config.scaling.mode {
            PromptMode::Always => Mismatch::Scale,
            PromptMode::Never => Mismatch::Keep,
            PromptMode::Ask => {
                let message = format!(
                    "Size of {} ({}x{}) does not fit screen {} ({}). Should the image be scaled?",
                    file,
                    source.width(),
                    source.height(),
                    screen.device_name,
                    screen.resolution_token()
                );
                self.prompter.choose(
                    Menu::new(message)
                        .option("yes", Mismatch::Scale)
                        .option("no", Mismatch::Keep),
                )?
            }
        };

        info!(
            "[STITCH] {} is {}x{} on a {} monitor: {:?}",
            file,
            source.width(),
            source.height(),
            screen.resolution_token(),
            choice
        );

        Ok(match choice {
            Mismatch::Scale => scale_to_screen(&source, screen, self.config.scaling.filter),
            Mismatch::Keep => source,
        })
    }

    fn confirm_overwrite(&mut self, target: &OutputTarget) -> Result<Overwrite> {
        match self.config.overwrite {
            PromptMode::Always => Ok(Overwrite::Replace),
            PromptMode::Never => Ok(Overwrite::Cancel),
            PromptMode::Ask => self.prompter.choose(
                Menu::new(format!(
                    "file \"{}\" does already exist. Do you want to override?",
                    target.path.display()
                ))
                .option("override", Overwrite::Replace)
                .option("cancel", Overwrite::Cancel),
            ),
        }
    }
}
