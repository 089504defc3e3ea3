//! Session transcript
//!
//! One `Session` per launcher run. Entries are appended to a single
//! timestamp-named file that is reopened for every write, so a removed
//! or rotated directory only loses individual entries.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::consts::{ISO_TIMESTAMP_FORMAT, SESSION_LOG_PREFIX, SESSION_STAMP_FORMAT};
use crate::error::AppError;

/// Category tag leading every transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Start,
    LogFile,
    Launch,
    Select,
    Error,
    End,
    Exit,
    Interrupt,
}

impl Tag {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Tag::Start => "[START]",
            Tag::LogFile => "[LOGFILE]",
            Tag::Launch => "[LAUNCH]",
            Tag::Select => "[SELECT]",
            Tag::Error => "[ERROR]",
            Tag::End => "[END]",
            Tag::Exit => "[EXIT]",
            Tag::Interrupt => "[INTERRUPT]",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ISO-8601 local timestamp with microseconds, no offset
pub(crate) fn iso_timestamp(at: DateTime<Local>) -> String {
    at.format(ISO_TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug)]
pub(crate) struct Session {
    log_path: PathBuf,
}

impl Session {
    /// Create the log directory and open a new transcript.
    pub(crate) fn start(logs_dir: &Path) -> Result<Self, AppError> {
        Self::start_at(logs_dir, Local::now())
    }

    pub(crate) fn start_at(logs_dir: &Path, started: DateTime<Local>) -> Result<Self, AppError> {
        fs::create_dir_all(logs_dir).map_err(|source| AppError::LogDir {
            path: logs_dir.to_path_buf(),
            source,
        })?;

        let file_name = format!(
            "{}{}.log",
            SESSION_LOG_PREFIX,
            started.format(SESSION_STAMP_FORMAT)
        );
        let session = Session {
            log_path: logs_dir.join(file_name),
        };

        session.log(
            Tag::Start,
            format_args!(
                "Dojo Controller session started @ {}",
                iso_timestamp(started)
            ),
        );
        session.log(Tag::LogFile, session.log_path.display());
        Ok(session)
    }

    pub(crate) fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append a tagged entry
    pub(crate) fn log(&self, tag: Tag, message: impl fmt::Display) {
        self.append(&format!("{tag} {message}"));
    }

    /// Append raw text (trailing whitespace trimmed, one newline added).
    /// Failures are discarded here and nowhere else.
    pub(crate) fn append(&self, text: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| writeln!(file, "{}", text.trim_end()));
        if let Err(e) = result {
            debug!(path = %self.log_path.display(), error = %e, "transcript write dropped");
        }
    }

    /// Closing entries for an operator-requested exit
    pub(crate) fn finish(&self) {
        self.log(Tag::Exit, "User exited Dojo");
        self.log(
            Tag::End,
            format_args!("Session ended @ {}", iso_timestamp(Local::now())),
        );
        self.append(&"=".repeat(80));
    }
}
