//! Recursive file listing ordered by modification time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::pattern::matches_any;
use super::FileError;

const PROGRESS_EVERY: usize = 50_000;

/// Every file under `root`, oldest first, filtered by `patterns`
/// (`.ext` or wildcard, any match keeps the file; empty keeps all).
///
/// Unreadable entries below `root` are logged and skipped.
pub fn list_files_by_mod_time<S: AsRef<str>>(
    root: impl AsRef<Path>,
    patterns: &[S],
) -> Result<Vec<PathBuf>, FileError> {
    let root = root.as_ref();
    let mut pending = vec![fs::read_dir(root).map_err(|e| FileError::io(root, e))?];
    let mut found: Vec<(SystemTime, PathBuf)> = Vec::new();

    while let Some(dir) = pending.pop() {
        for entry in dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping entry");
                    continue;
                }
            };

            if file_type.is_dir() {
                match fs::read_dir(&path) {
                    Ok(children) => pending.push(children),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping directory");
                    }
                }
                continue;
            }

            if !matches_any(&entry.file_name().to_string_lossy(), patterns) {
                continue;
            }

            match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => found.push((modified, path)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Unable to stat file");
                    continue;
                }
            }
            if found.len() % PROGRESS_EVERY == 0 {
                tracing::info!(files = found.len(), root = %root.display(), "Scanning");
            }
        }
    }

    found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn touch(path: &Path, age_secs: u64) {
        fs::write(path, b"x").unwrap();
        let when = SystemTime::now() - Duration::from_secs(age_secs);
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(when)
            .unwrap();
    }

    #[test]
    fn oldest_first_across_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("sub/deeper")).unwrap();
        touch(&tmp.path().join("new.csv"), 10);
        touch(&tmp.path().join("sub/old.csv"), 300);
        touch(&tmp.path().join("sub/deeper/mid.csv"), 100);

        let files = list_files_by_mod_time::<&str>(tmp.path(), &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["old.csv", "mid.csv", "new.csv"]);
    }

    #[test]
    fn applies_extension_and_wildcard_filters() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("a.csv"), 30);
        touch(&tmp.path().join("b.TXT"), 20);
        touch(&tmp.path().join("report-1.log"), 10);

        let files = list_files_by_mod_time(tmp.path(), &[".txt", "report*.*"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b.TXT", "report-1.log"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(list_files_by_mod_time::<&str>(tmp.path().join("missing"), &[]).is_err());
    }
}
