//! Basic filesystem operations with path-carrying errors.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::FileError;

/// Create `path` and any missing parents.
pub fn create_dir(path: impl AsRef<Path>) -> Result<(), FileError> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| FileError::io(path, e))
}

/// True when `path` exists and can be inspected.
pub fn exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).is_ok()
}

/// Remove a file or a whole directory tree. A missing path is not an error.
pub fn remove(path: impl AsRef<Path>) -> Result<(), FileError> {
    let path = path.as_ref();
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(FileError::io(path, e)),
    };
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FileError::io(path, e))
}

/// Copy a file, or a directory recursively, keeping permissions.
pub fn copy(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<(), FileError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let meta = fs::metadata(src).map_err(|e| FileError::io(src, e))?;
    if meta.is_dir() {
        copy_dir(src, dst)
    } else {
        // fs::copy carries the permission bits over.
        fs::copy(src, dst).map(|_| ()).map_err(|e| FileError::io(dst, e))
    }
}

fn copy_dir(src: &Path, dst: &Path) -> Result<(), FileError> {
    fs::create_dir_all(dst).map_err(|e| FileError::io(dst, e))?;

    for entry in fs::read_dir(src).map_err(|e| FileError::io(src, e))? {
        let entry = entry.map_err(|e| FileError::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| FileError::io(&from, e))?;
        if file_type.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| FileError::io(&to, e))?;
        }
    }

    let perms = fs::metadata(src)
        .map_err(|e| FileError::io(src, e))?
        .permissions();
    fs::set_permissions(dst, perms).map_err(|e| FileError::io(dst, e))
}

pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>, FileError> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| FileError::io(path, e))
}

/// Create or truncate `path` and write `data`.
pub fn write_bytes(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<(), FileError> {
    let path = path.as_ref();
    fs::write(path, data).map_err(|e| FileError::io(path, e))
}

/// Write each line in order, optionally terminated by `\r\n`.
pub fn write_lines<S: AsRef<str>>(
    path: impl AsRef<Path>,
    lines: &[S],
    add_newline: bool,
) -> Result<(), FileError> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|e| FileError::io(path, e))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        out.write_all(line.as_ref().as_bytes())
            .map_err(|e| FileError::io(path, e))?;
        if add_newline {
            out.write_all(b"\r\n").map_err(|e| FileError::io(path, e))?;
        }
    }
    out.flush().map_err(|e| FileError::io(path, e))
}

/// The directory a program runs from.
///
/// `working_dir` selects the process working directory; otherwise the
/// directory holding the executable, falling back to the working directory
/// when the executable path cannot be resolved.
pub fn run_path(working_dir: bool) -> Result<PathBuf, FileError> {
    let cwd = || std::env::current_dir().map_err(|e| FileError::io(Path::new("."), e));
    if working_dir {
        return cwd();
    }
    match std::env::current_exe() {
        Ok(exe) => Ok(exe.parent().map_or_else(|| exe.clone(), Path::to_path_buf)),
        Err(e) => {
            tracing::warn!(error = %e, "Executable path unavailable, using working directory");
            cwd()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_path_picks_working_or_executable_dir() {
        assert_eq!(run_path(true).unwrap(), std::env::current_dir().unwrap());

        let exe = std::env::current_exe().unwrap();
        assert_eq!(run_path(false).unwrap(), exe.parent().unwrap());
        assert!(run_path(false).unwrap().is_dir());
    }

    #[test]
    fn create_write_read_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a/b/c");
        create_dir(&dir).unwrap();
        assert!(exists(&dir));

        let file = dir.join("data.bin");
        write_bytes(&file, [1u8, 2, 3]).unwrap();
        assert_eq!(read_bytes(&file).unwrap(), vec![1, 2, 3]);

        remove(tmp.path().join("a")).unwrap();
        assert!(!exists(&dir));
        remove(tmp.path().join("a")).unwrap();
    }

    #[test]
    fn write_lines_with_crlf() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("out.csv");
        write_lines(&file, &["a,b", "1,2"], true).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "a,b\r\n1,2\r\n");

        write_lines(&file, &["x", "y"], false).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "xy");
    }

    #[test]
    fn copies_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        create_dir(src.join("nested")).unwrap();
        write_bytes(src.join("top.txt"), "top").unwrap();
        write_bytes(src.join("nested/inner.txt"), "inner").unwrap();

        let dst = tmp.path().join("dst");
        copy(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst.join("top.txt")).unwrap(), "top");
        assert_eq!(fs::read_to_string(dst.join("nested/inner.txt")).unwrap(), "inner");
    }

    #[cfg(unix)]
    #[test]
    fn copy_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("run.sh");
        write_bytes(&src, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();

        let dst = tmp.path().join("copy.sh");
        copy(&src, &dst).unwrap();
        let mode = fs::metadata(&dst).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[test]
    fn missing_source_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = copy(&missing, tmp.path().join("x")).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
