//! Writing artifacts to the local filesystem

use super::{Artifact, ArtifactBody};
use apkget_errors::{Error, TransferError};
use apkget_events::{AppEvent, EventEmitter, EventSender, TransferEvent};
use std::path::{Path, PathBuf};
use tokio::fs::{self as tokio_fs, File};
use tokio::io::AsyncWriteExt;

/// A file written by [`save_to_dir`]
#[derive(Debug, Clone)]
pub struct SavedArtifact {
    /// Absolute path of the written file
    pub path: PathBuf,
    pub bytes: u64,
}

/// Write the artifact into `dir` under its metadata filename
///
/// The directory is created when missing and an existing file with the
/// same name is overwritten. A partially written file is removed on
/// failure.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created, or the
/// body fails before it is fully written.
pub async fn save_to_dir(
    artifact: Artifact,
    dir: &Path,
    tx: &EventSender,
) -> Result<SavedArtifact, Error> {
    tokio_fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::io_with_path(&e, dir))?;

    let path = dir.join(&artifact.metadata.filename);
    let url = artifact.url.to_string();

    let written = match write_body(artifact.body, &path).await {
        Ok(written) => written,
        Err((e, written)) => {
            if let Err(remove_err) = tokio_fs::remove_file(&path).await {
                if remove_err.kind() != std::io::ErrorKind::NotFound {
                    tx.emit_warning_with_context(
                        format!("could not remove partial artifact: {remove_err}"),
                        path.display().to_string(),
                    );
                }
            }
            tx.emit(AppEvent::Transfer(TransferEvent::Aborted {
                url,
                bytes: written,
                reason: e.to_string(),
            }));
            return Err(e);
        }
    };

    let absolute = tokio_fs::canonicalize(&path)
        .await
        .map_err(|e| Error::io_with_path(&e, &path))?;

    tx.emit_transfer_completed(url, written, Some(absolute.display().to_string()));
    Ok(SavedArtifact {
        path: absolute,
        bytes: written,
    })
}

/// Write the body, returning the byte count reached on failure alongside the error
async fn write_body(body: ArtifactBody, path: &Path) -> Result<u64, (Error, u64)> {
    let mut file = File::create(path)
        .await
        .map_err(|e| (Error::io_with_path(&e, path), 0))?;

    match body {
        ArtifactBody::Stream(mut stream) => match stream.write_to(&mut file).await {
            Ok(written) => Ok(written),
            Err(e) => {
                let written = match &e {
                    Error::Transfer(TransferError::SinkClosed { bytes, .. }) => *bytes,
                    _ => stream.bytes_read(),
                };
                Err((e, written))
            }
        },
        ArtifactBody::Buffer(bytes) => {
            file.write_all(&bytes)
                .await
                .map_err(|e| (Error::io_with_path(&e, path), 0))?;
            file.flush()
                .await
                .map_err(|e| (Error::io_with_path(&e, path), bytes.len() as u64))?;
            Ok(bytes.len() as u64)
        }
    }
}
