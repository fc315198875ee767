//! Temp-file-then-rename writes, so a failed run leaves no partial file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// Writes every `(target, bytes)` pair or none of them.
///
/// All contents are staged in temp files next to their targets before the
/// first rename. On failure, staged temp files and targets already renamed
/// by this call are removed.
pub(crate) fn write_files_atomic(files: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for (target, bytes) in files {
        match stage(target, bytes) {
            Ok(temp_path) => staged.push((temp_path, target.as_path())),
            Err(error) => {
                discard_temps(&staged);
                return Err(error);
            }
        }
    }

    for (index, (temp_path, target)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(temp_path, target) {
            discard_temps(&staged[index..]);
            for (_, committed) in &staged[..index] {
                let _ = fs::remove_file(committed);
            }
            return Err(OutputError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: target.to_path_buf(),
                source,
            });
        }
    }
    Ok(())
}

/// Writes `bytes` to the temp path for `target` and returns that path.
fn stage(target: &Path, bytes: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(target);
    let mut file = File::create(&temp_path).map_err(|source| OutputError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    let written = file
        .write_all(bytes)
        .map_err(|source| (source, "write"))
        .and_then(|()| file.sync_all().map_err(|source| (source, "sync")));
    drop(file);

    match written {
        Ok(()) => Ok(temp_path),
        Err((source, operation)) => {
            let _ = fs::remove_file(&temp_path);
            Err(OutputError::Io {
                operation,
                path: temp_path,
                source,
            })
        }
    }
}

fn discard_temps(staged: &[(PathBuf, &Path)]) {
    for (temp_path, _) in staged {
        let _ = fs::remove_file(temp_path);
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
