use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::output::errors::OutputError;

/// Writes serialised records into `out_dir`, creating the directory when
/// needed, and returns the written paths.
///
/// Each record is first written under a hidden `.part` name and only renamed
/// into place once every record has been staged. On failure the staged and
/// already renamed files are removed, so a run writes all of its records or
/// none of them.
pub fn write_records<'a, I>(out_dir: &str, records: I) -> Result<Vec<PathBuf>, OutputError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let dir = Path::new(out_dir);
    fs::create_dir_all(dir).map_err(|e| {
        OutputError::FileError(format!("failed to create directory {}: {}", out_dir, e))
    })?;

    let mut staged: Vec<(PathBuf, PathBuf, usize)> = Vec::new();
    for (file_name, contents) in records {
        let part_path = dir.join(format!(".{}.part", file_name));
        if let Err(e) = fs::write(&part_path, contents) {
            discard(staged.iter().map(|(part, _, _)| part));
            discard([&part_path]);
            return Err(OutputError::FileError(format!(
                "failed to write record {}: {}",
                file_name, e
            )));
        }
        staged.push((part_path, dir.join(file_name), contents.len()));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (i, (part_path, out_path, _)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(part_path, out_path) {
            discard(written.iter().chain(staged[i..].iter().map(|(part, _, _)| part)));
            return Err(OutputError::FileError(format!(
                "failed to write record {}: {}",
                out_path.display(),
                e
            )));
        }
        written.push(out_path.clone());
    }

    for (_, out_path, bytes) in &staged {
        info!(path = %out_path.display(), bytes, "wrote record");
    }
    Ok(written)
}

fn discard<'p>(paths: impl IntoIterator<Item = &'p PathBuf>) {
    for path in paths {
        match fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                warn!(path = %path.display(), error = %e, "failed to remove partial record");
            }
            _ => {}
        }
    }
}
