//! Per-request temporary storage for uploaded recordings.
//!
//! Each upload is written to its own randomly named file inside the temp
//! directory. [`TempAudioFile`] owns that file and removes it when dropped, so
//! the file disappears on every exit path of the request, including early
//! returns, errors and panics that unwind through the handler.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

/// File name prefix for uploaded recordings.
pub const TEMP_FILE_PREFIX: &str = "temp_recording_";

/// Number of random bytes hex-encoded into each file name.
const RANDOM_SUFFIX_BYTES: usize = 4;

/// Attempts at drawing an unused file name before giving up.
const MAX_CREATE_ATTEMPTS: usize = 8;

/// Create the temp directory if it does not exist yet.
///
/// Idempotent; called once while building the application state.
pub fn ensure_temp_dir(path: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// Random `temp_recording_<hex>.wav` file name.
fn random_file_name() -> String {
    let id = Uuid::new_v4();
    let suffix = hex::encode(&id.as_bytes()[..RANDOM_SUFFIX_BYTES]);
    format!("{TEMP_FILE_PREFIX}{suffix}.wav")
}

/// An uploaded recording persisted to disk for the duration of one request.
#[derive(Debug)]
pub struct TempAudioFile {
    path: PathBuf,
}

impl TempAudioFile {
    /// Write `bytes` to a fresh, uniquely named file inside `dir`.
    ///
    /// The file is opened with exclusive-create semantics; if the random name
    /// is already taken a new one is drawn.
    pub fn create(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let path = dir.join(random_file_name());
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("Temp file name collision at {}, retrying", path.display());
                    continue;
                }
                Err(e) => return Err(e),
            };

            // Guard exists before the write so a failed write still removes the file
            let guard = Self { path };
            file.write_all(bytes)?;
            file.sync_data()?;
            debug!(
                "Persisted {} upload bytes to {}",
                bytes.len(),
                guard.path.display()
            );
            return Ok(guard);
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no unused temp file name after {MAX_CREATE_ATTEMPTS} attempts"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudioFile {
    fn drop(&mut self) {
        // Best effort; a failed removal is never reported to the client
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temp file {}", self.path.display()),
            Err(e) => debug!("Could not remove temp file {}: {e}", self.path.display()),
        }
    }
}
