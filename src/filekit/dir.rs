use crate::utils::error::{KitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `path` and any missing parents.
pub fn mk_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    fs::create_dir_all(path.as_ref())?;
    Ok(())
}

pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        tracing::debug!("Creating directory {}", path.display());
        mk_dir(path)?;
    }
    Ok(())
}

pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Remove a file or a whole directory tree. A path that does not exist is not an error.
pub fn delete_dir_or_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Walk `deep` levels up from the current working directory.
pub fn get_parent_dir(deep: usize) -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    for _ in 0..deep {
        current = current
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| KitError::invalid_argument(format!("no parent {} levels up", deep)))?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mk_dir_and_delete() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b/c");

        ensure_dir_exists(&nested).unwrap();
        assert!(dir_exists(&nested));
        ensure_dir_exists(&nested).unwrap();

        fs::write(nested.join("f.txt"), b"x").unwrap();
        delete_dir_or_file(tmp.path().join("a")).unwrap();
        assert!(!dir_exists(tmp.path().join("a")));

        // Gone already.
        assert!(delete_dir_or_file(tmp.path().join("a")).is_ok());
    }

    #[test]
    fn test_get_parent_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(get_parent_dir(0).unwrap(), cwd);
        assert_eq!(get_parent_dir(1).unwrap(), cwd.parent().unwrap());
        assert!(get_parent_dir(10_000).is_err());
    }
}
