use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::AppError;
use crate::tailoring::models::ResumeDocument;

/// Reads and decodes the source résumé.
pub fn load_resume(path: &Path) -> Result<ResumeDocument, AppError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::InputNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(AppError::Io(e)),
    };

    let value = serde_json::from_str(&contents).map_err(|source| AppError::InputMalformed {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded resume from {}", path.display());
    Ok(ResumeDocument(value))
}

/// Writes the tailored résumé as four-space-indented JSON, replacing any
/// existing file. The content goes to a temp file in the same directory first,
/// so a failed write never leaves a half-written output behind.
pub fn write_tailored_resume(path: &Path, resume: &ResumeDocument) -> Result<(), AppError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    resume
        .serialize(&mut serializer)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize tailored resume: {e}")))?;
    buf.push(b'\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&buf)?;
    file.persist(path).map_err(|e| AppError::Io(e.error))?;

    info!("Wrote tailored resume to {}", path.display());
    Ok(())
}
