//! Line sources for the tokenizer
//!
//! In-memory text splits with [`lines_from_str`]. Files open with
//! [`open_lines`], which checks the size up front and then reads one line
//! per pull.

use crate::config::compile_time::source::MAX_FILE_SIZE;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Line source failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Invalid UTF-8 in {path} at line {line}")]
    InvalidEncoding { path: String, line: usize },

    #[error("I/O error reading {path}: {message}")]
    IoError { path: String, message: String },
}

impl SourceError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SourceError::FileNotFound { .. } => codes::source::FILE_NOT_FOUND,
            SourceError::FileTooLarge { .. } => codes::source::FILE_TOO_LARGE,
            SourceError::InvalidEncoding { .. } | SourceError::IoError { .. } => {
                codes::source::IO_ERROR
            }
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(path: &Path, error: io::Error, line: usize) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => SourceError::FileNotFound { path },
            io::ErrorKind::InvalidData => SourceError::InvalidEncoding { path, line },
            _ => SourceError::IoError {
                path,
                message: error.to_string(),
            },
        }
    }
}

/// Split in-memory text into lines without terminators
pub fn lines_from_str(text: &str) -> std::str::Lines<'_> {
    text.lines()
}

/// Lazily read lines from a file
#[derive(Debug)]
pub struct SourceLines {
    path: PathBuf,
    lines: io::Lines<BufReader<File>>,
    read: usize,
    failed: bool,
}

impl SourceLines {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines handed out so far
    pub fn lines_read(&self) -> usize {
        self.read
    }

    /// Plain `String` lines; the first read error ends the sequence and is
    /// parked in the returned [`ReadFailure`].
    pub fn checked(self) -> (CheckedLines, ReadFailure) {
        let failure = ReadFailure::default();
        (
            CheckedLines {
                inner: self,
                failure: failure.clone(),
            },
            failure,
        )
    }
}

impl Iterator for SourceLines {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.lines.next()? {
            Ok(line) => {
                self.read += 1;
                Some(Ok(line))
            }
            Err(e) => {
                self.failed = true;
                let error = SourceError::from_io(&self.path, e, self.read + 1);
                log_error!(error.error_code(), "Failed to read source line",
                    "file" => self.path.display(),
                    "line" => self.read + 1
                );
                Some(Err(error))
            }
        }
    }
}

/// Slot holding the read error that ended a [`CheckedLines`] sequence
#[derive(Clone, Default)]
pub struct ReadFailure(Rc<Cell<Option<SourceError>>>);

impl ReadFailure {
    pub fn take(&self) -> Option<SourceError> {
        self.0.take()
    }

    fn set(&self, error: SourceError) {
        self.0.set(Some(error));
    }
}

/// File lines with read errors split off into a [`ReadFailure`]
pub struct CheckedLines {
    inner: SourceLines,
    failure: ReadFailure,
}

impl Iterator for CheckedLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self.inner.next()? {
            Ok(line) => Some(line),
            Err(e) => {
                self.failure.set(e);
                None
            }
        }
    }
}

/// Open `path` for lazy line reading
pub fn open_lines(path: &Path) -> Result<SourceLines, SourceError> {
    log_debug!("Opening source", "file" => path.display());

    let metadata = std::fs::metadata(path).map_err(|e| {
        let error = SourceError::from_io(path, e, 0);
        log_error!(error.error_code(), "Source not readable", "file" => path.display());
        error
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        let error = SourceError::FileTooLarge {
            size: metadata.len(),
            max_size: MAX_FILE_SIZE,
        };
        log_error!(error.error_code(), "Source exceeds size limit",
            "file" => path.display(),
            "size" => metadata.len()
        );
        return Err(error);
    }

    let file = File::open(path).map_err(|e| SourceError::from_io(path, e, 0))?;

    log_success!(codes::success::SOURCE_LOADED, "Source opened",
        "file" => path.display(),
        "size_bytes" => metadata.len()
    );

    Ok(SourceLines {
        path: path.to_path_buf(),
        lines: BufReader::new(file).lines(),
        read: 0,
        failed: false,
    })
}
