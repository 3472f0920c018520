use crate::storage::error::ReceiveError;
use actix_multipart::form::tempfile::TempFile;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

#[cfg(unix)]
const DIR_MODE: u32 = 0o777;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

pub fn resolve_destination(to: &str) -> Result<PathBuf, ReceiveError> {
    let path = Path::new(to);
    if !path.is_absolute() {
        return Err(ReceiveError::RelativePath(to.to_string()));
    }
    Ok(path.to_path_buf())
}

/// Makes sure the directory that will hold `dest` exists, creating it and any
/// missing ancestors. An existing parent is accepted as-is.
pub fn ensure_parent_dir(dest: &Path) -> Result<(), ReceiveError> {
    // "/" has no parent; opening it as a file fails later on.
    let Some(dir) = dest.parent() else {
        return Ok(());
    };

    match fs::metadata(dir) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_dir_all(dir).map_err(|source| ReceiveError::CreateDir {
                dir: dir.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(ReceiveError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        }),
    }
}

fn create_dir_all(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder.create(dir)
}

fn open_truncated(dest: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);
    options.open(dest)
}

/// Writes the whole of `input` to `dest`, replacing whatever was there.
/// The destination handle is closed on return, whichever way that goes; a
/// failed copy leaves the partial content behind.
pub fn save_upload<R: Read>(input: &mut R, dest: &Path) -> Result<u64, ReceiveError> {
    let mut outfile = open_truncated(dest).map_err(|source| ReceiveError::Open {
        path: dest.to_path_buf(),
        source,
    })?;

    io::copy(input, &mut outfile).map_err(|source| ReceiveError::Copy {
        path: dest.to_path_buf(),
        source,
    })
}

/// The blocking half of a POST: validate `to`, prepare its directory, then
/// copy the spooled upload into place.
pub fn store(to: &str, upload: Option<TempFile>) -> Result<(PathBuf, u64), ReceiveError> {
    let dest = resolve_destination(to)?;
    ensure_parent_dir(&dest)?;

    // A part without a filename is a plain value, not a file.
    let upload = upload
        .filter(|f| f.file_name.as_deref().is_some_and(|name| !name.is_empty()))
        .ok_or(ReceiveError::MissingFile)?;
    let mut infile = upload.file.reopen().map_err(ReceiveError::Unreadable)?;

    let written = save_upload(&mut infile, &dest)?;
    Ok((dest, written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn relative_destination_is_rejected() {
        for to in ["", "relative/path", "./out.bin", "../out.bin"] {
            match resolve_destination(to) {
                Err(ReceiveError::RelativePath(p)) => assert_eq!(p, to),
                other => panic!("expected RelativePath for {to:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn creates_missing_ancestors() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("a/b/c/out.bin");

        ensure_parent_dir(&dest).unwrap();

        assert!(tmp.path().join("a/b/c").is_dir());
        assert!(!dest.exists());
    }

    #[test]
    fn existing_parent_is_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        ensure_parent_dir(&tmp.path().join("out.bin")).unwrap();
    }

    #[test]
    fn parent_blocked_by_regular_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = ensure_parent_dir(&blocker.join("sub/out.bin")).unwrap_err();
        assert!(matches!(err, ReceiveError::CreateDir { .. }), "{err}");
    }

    #[test]
    fn save_truncates_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out.bin");
        fs::write(&dest, b"a much longer previous payload").unwrap();

        let written = save_upload(&mut Cursor::new(b"short".to_vec()), &dest).unwrap();

        assert_eq!(written, 5);
        assert_eq!(fs::read(&dest).unwrap(), b"short");
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_not_group_writable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out.bin");
        save_upload(&mut Cursor::new(vec![0u8; 3]), &dest).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o133, 0, "unexpected mode {mode:o}");
    }

    #[test]
    fn open_failure_on_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = save_upload(&mut Cursor::new(vec![1u8]), tmp.path()).unwrap_err();
        assert!(matches!(err, ReceiveError::Open { .. }), "{err}");
    }

    #[test]
    fn store_result_crosses_blocking_pool() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<Result<(PathBuf, u64), ReceiveError>>();
    }

    #[test]
    fn store_without_file_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out.bin");

        let err = store(dest.to_str().unwrap(), None).unwrap_err();

        assert!(matches!(err, ReceiveError::MissingFile));
        assert!(!dest.exists());
    }
}
