// mtime-based rebuild gate: any input newer than the bundle rebuilds the whole bundle

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Last modification time, or the epoch when it cannot be read
fn modified_time(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .unwrap_or(UNIX_EPOCH)
}

/// Latest modification time across `files`, `None` when there are none
pub fn latest_modified(files: &[PathBuf]) -> Option<SystemTime> {
    files.iter().map(|file| modified_time(file)).max()
}

/// Whether the bundle must be regenerated from `inputs`.
///
/// Never with no inputs. Otherwise when there is no output path, the output
/// does not exist, or it is strictly older than the newest input.
pub fn needs_rebuild(inputs: &[PathBuf], output: Option<&Path>) -> bool {
    let Some(latest_input) = latest_modified(inputs) else {
        return false;
    };

    let Some(output) = output else {
        return true;
    };

    match fs::metadata(output) {
        Ok(_) => modified_time(output) < latest_input,
        Err(_) => true,
    }
}
