use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    // configuration
    #[error("could not find any images in folder {}", .0.display())]
    NoImages(PathBuf),
    #[error("invalid output file format: {0}")]
    UnsupportedOutputFormat(String),
    #[error("invalid file format: {0}")]
    UnsupportedImage(String),
    #[error("config error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    // screen source
    #[error("screen source failed: {0}")]
    ScreenSource(String),
    #[error("screen source reported no monitors")]
    NoScreens,
    #[error("monitor layout produces an empty canvas ({width}x{height})")]
    DegenerateCanvas { width: i64, height: i64 },

    // io
    #[error("could not read image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not save file to {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // interactive
    #[error("standard input closed while waiting for a choice")]
    InputClosed,
    #[error("nothing to choose from: {0}")]
    NothingToChoose(String),
}

impl StitchError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StitchError>;
