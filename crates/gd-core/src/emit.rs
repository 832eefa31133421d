//! File emitters
//!
//! An emitter hands an [`EncodedPayload`] to its destination. The file
//! emitter writes through a hidden temporary file and renames it into place,
//! so a failed export never leaves a partial file behind.

use crate::error::{GigDeskError, Result};
use crate::export::EncodedPayload;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Where an emitted payload ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub filename: String,
    /// Final location, when written to disk
    pub path: Option<PathBuf>,
    pub bytes: usize,
    pub rows: usize,
}

/// Trait for payload destinations
pub trait Emitter: Send + Sync {
    fn emit(&self, payload: &EncodedPayload) -> Result<EmittedFile>;
}

/// Writes payloads into a directory
pub struct FileEmitter {
    output_dir: PathBuf,
}

impl FileEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn temp_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(format!(".{}.tmp", filename))
    }
}

impl Emitter for FileEmitter {
    fn emit(&self, payload: &EncodedPayload) -> Result<EmittedFile> {
        validate_filename(&payload.filename)?;

        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
            debug!("Created output directory: {:?}", self.output_dir);
        }

        let final_path = self.output_dir.join(&payload.filename);
        if final_path.exists() {
            return Err(GigDeskError::Validation(format!(
                "Refusing to overwrite existing file: {}",
                final_path.display()
            )));
        }
        let temp_path = self.temp_path(&payload.filename);

        let written = write_file(&temp_path, &payload.bytes)
            .and_then(|_| fs::rename(&temp_path, &final_path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(GigDeskError::Io(e)
                .with_context(format!("Failed to write {}", final_path.display())));
        }

        info!(
            "Wrote {} ({} bytes, {} rows)",
            final_path.display(),
            payload.len(),
            payload.rows
        );

        Ok(EmittedFile {
            filename: payload.filename.clone(),
            path: Some(final_path),
            bytes: payload.len(),
            rows: payload.rows,
        })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

// Generated names never contain separators; anything else would escape
// the output directory.
fn validate_filename(filename: &str) -> Result<()> {
    let invalid = filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename == "."
        || filename == "..";
    if invalid {
        return Err(GigDeskError::Validation(format!(
            "Invalid export filename: {:?}",
            filename
        )));
    }
    Ok(())
}

/// Writes raw payload bytes to stdout
pub struct StdoutEmitter;

impl Emitter for StdoutEmitter {
    fn emit(&self, payload: &EncodedPayload) -> Result<EmittedFile> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&payload.bytes)?;
        handle.flush()?;

        Ok(EmittedFile {
            filename: payload.filename.clone(),
            path: None,
            bytes: payload.len(),
            rows: payload.rows,
        })
    }
}

/// Keeps emitted payloads in memory
#[derive(Default)]
pub struct MemoryEmitter {
    emitted: Mutex<Vec<EncodedPayload>>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads emitted so far, oldest first
    pub fn emitted(&self) -> Vec<EncodedPayload> {
        self.emitted
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&self, payload: &EncodedPayload) -> Result<EmittedFile> {
        let mut guard = self
            .emitted
            .lock()
            .map_err(|_| GigDeskError::Validation("Memory emitter lock poisoned".to_string()))?;
        guard.push(payload.clone());

        Ok(EmittedFile {
            filename: payload.filename.clone(),
            path: None,
            bytes: payload.len(),
            rows: payload.rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExportFormat;

    fn payload(filename: &str) -> EncodedPayload {
        EncodedPayload {
            bytes: b"ID,Name\n1,\"A\"".to_vec(),
            mime_type: "text/csv".to_string(),
            filename: filename.to_string(),
            format: ExportFormat::Csv,
            rows: 1,
        }
    }

    #[test]
    fn test_file_emitter_writes_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = FileEmitter::new(dir.path().join("reports"));

        let emitted = emitter.emit(&payload("admin-report-month-1.csv")).unwrap();
        let path = emitted.path.unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"ID,Name\n1,\"A\"");
        assert_eq!(emitted.bytes, 13);

        let leftovers: Vec<_> = fs::read_dir(dir.path().join("reports"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_file_emitter_rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = FileEmitter::new(dir.path());
        assert!(emitter.emit(&payload("../escape.csv")).is_err());
        assert!(emitter.emit(&payload("")).is_err());
    }

    #[test]
    fn test_file_emitter_failure_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the target name makes the rename fail.
        fs::create_dir(dir.path().join("taken.csv")).unwrap();
        fs::write(dir.path().join("taken.csv").join("keep"), b"x").unwrap();

        let emitter = FileEmitter::new(dir.path());
        assert!(emitter.emit(&payload("taken.csv")).is_err());
        assert!(!dir.path().join(".taken.csv.tmp").exists());
    }

    #[test]
    fn test_file_emitter_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("admin-report-month-1.csv");
        fs::write(&existing, b"earlier export").unwrap();

        let emitter = FileEmitter::new(dir.path());
        let err = emitter
            .emit(&payload("admin-report-month-1.csv"))
            .unwrap_err();
        assert!(matches!(err, GigDeskError::Validation(_)));
        assert_eq!(fs::read(&existing).unwrap(), b"earlier export");
        assert!(!dir.path().join(".admin-report-month-1.csv.tmp").exists());
    }

    #[test]
    fn test_memory_emitter() {
        let emitter = MemoryEmitter::new();
        emitter.emit(&payload("a.csv")).unwrap();
        emitter.emit(&payload("b.csv")).unwrap();
        let names: Vec<_> = emitter.emitted().into_iter().map(|p| p.filename).collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }
}
