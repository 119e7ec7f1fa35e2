use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, AtomicU8, Ordering},
        mpsc::{self, Sender},
        Mutex, OnceLock,
    },
    thread,
    time::Duration,
};

/* =========================
   GLOBAL STATE
   ========================= */

static DEBUG: AtomicBool = AtomicBool::new(false);
static LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);
static LOG_TX: OnceLock<Mutex<Sender<LogMessage>>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" | "trace" => Some(Self::Debug),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

enum LogMessage {
    Line(String),
    Flush(Sender<()>),
}

/// Append-only log file, created on the first line so a quiet run leaves
/// nothing behind.
struct LogFile {
    path: PathBuf,
    file: Option<File>,
}

impl LogFile {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file: None,
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.file.is_none() {
            self.file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        match &mut self.file {
            Some(file) => writeln!(file, "{line}"),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.file {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/* =========================
   PUBLIC API
   ========================= */

/// Starts the writer thread appending to `path`. Until this runs every
/// logging macro is a no-op. The file is opened when the first line arrives;
/// if that fails the error goes to stderr once and later lines are dropped.
pub fn init(debug: bool, level: &str, path: &Path) {
    if LOG_TX.get().is_some() {
        return;
    }

    DEBUG.store(debug, Ordering::Relaxed);
    let level = Level::parse(level).unwrap_or(Level::Warn);
    LEVEL.store(level as u8, Ordering::Relaxed);

    let mut file = LogFile::new(path);
    let (tx, rx) = mpsc::channel::<LogMessage>();
    let _ = LOG_TX.set(Mutex::new(tx));

    thread::spawn(move || {
        let mut broken = false;
        while let Ok(message) = rx.recv() {
            match message {
                LogMessage::Line(line) if !broken => {
                    if let Err(e) = file.write_line(&line) {
                        eprintln!("WARN: could not write log file {}: {e}", file.path.display());
                        broken = true;
                    }
                }
                LogMessage::Line(_) => {}
                LogMessage::Flush(done) => {
                    let _ = file.flush();
                    let _ = done.send(());
                }
            }
        }
    });
}

#[inline]
pub fn should_log(level: Level) -> bool {
    DEBUG.load(Ordering::Relaxed) || level as u8 <= LEVEL.load(Ordering::Relaxed)
}

/// Blocks until every queued line is on disk (bounded wait).
pub fn flush() {
    let Some(tx) = sender() else {
        return;
    };

    let (done_tx, done_rx) = mpsc::channel();
    if tx.send(LogMessage::Flush(done_tx)).is_ok() {
        let _ = done_rx.recv_timeout(Duration::from_secs(2));
    }
}

/* =========================
   INTERNAL
   ========================= */

#[inline]
pub fn enqueue(level: Level, msg: String) {
    if let Some(tx) = sender() {
        let _ = tx.send(LogMessage::Line(format!("{} [{}] {msg}", timestamp(), level.label())));
    }
}

fn sender() -> Option<Sender<LogMessage>> {
    LOG_TX.get()?.lock().ok().map(|tx| tx.clone())
}

fn timestamp() -> String {
    let now = chrono::Local::now();
    now.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/* =========================
   MACROS
   ========================= */

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        if $crate::logging::should_log($crate::logging::Level::Debug) {
            $crate::logging::enqueue($crate::logging::Level::Debug, format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        if $crate::logging::should_log($crate::logging::Level::Info) {
            $crate::logging::enqueue($crate::logging::Level::Info, format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        $crate::logging::enqueue($crate::logging::Level::Warn, format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        $crate::logging::enqueue($crate::logging::Level::Error, format!($($arg)*));
    }};
}
