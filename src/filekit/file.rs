use super::dir::ensure_dir_exists;
use crate::strkit::remove_space;
use crate::utils::error::{KitError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn delete_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KitError::invalid_argument(format!(
            "file does not exist: {}",
            path.display()
        )));
    }
    fs::remove_file(path)?;
    Ok(())
}

/// Create a directory when `path` has no extension, otherwise an empty file
/// (parents included). An existing path is an error unless `overwrite`.
pub fn create_path<P: AsRef<Path>>(path: P, overwrite: bool) -> Result<()> {
    let path = path.as_ref();
    if !overwrite && path.exists() {
        return Err(KitError::invalid_argument(format!(
            "path already exists: {}",
            path.display()
        )));
    }

    if path.extension().is_none() {
        fs::create_dir_all(path)?;
    } else {
        if let Some(parent) = path.parent() {
            ensure_dir_exists(parent)?;
        }
        fs::File::create(path)?;
    }
    Ok(())
}

/// Copy one file, creating the destination directory. Permissions are carried over.
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q, overwrite: bool) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if let Some(parent) = dst.parent() {
        ensure_dir_exists(parent)?;
    }
    if !overwrite && dst.exists() {
        return Err(KitError::invalid_argument(format!(
            "destination already exists: {}",
            dst.display()
        )));
    }

    // fs::copy also copies the permission bits.
    let bytes = fs::copy(src, dst)?;
    tracing::debug!("Copied {} -> {} ({} bytes)", src.display(), dst.display(), bytes);
    Ok(())
}

/// Recursively copy every file under `src_dir` into `dst_dir`, keeping the
/// relative layout. Files that fail to copy are logged and skipped.
pub fn copy_files<P: AsRef<Path>, Q: AsRef<Path>>(
    src_dir: P,
    dst_dir: Q,
    overwrite: bool,
) -> Result<()> {
    let (src_dir, dst_dir) = (src_dir.as_ref(), dst_dir.as_ref());
    ensure_dir_exists(dst_dir)?;

    let (files, _) = super::path::scandir(src_dir)?;
    for file in files {
        let relative = file
            .strip_prefix(src_dir)
            .map_err(|e| KitError::invalid_argument(e.to_string()))?;
        if let Err(e) = copy_file(&file, dst_dir.join(relative), overwrite) {
            tracing::warn!("Skipping {}: {}", file.display(), e);
        }
    }
    Ok(())
}

/// Move `src` into the directory `dst_parent`, which is created when missing.
pub fn move_dir<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst_parent: Q) -> Result<()> {
    let (src, dst_parent) = (src.as_ref(), dst_parent.as_ref());
    if !src.exists() {
        return Err(KitError::invalid_argument(format!(
            "source path does not exist: {}",
            src.display()
        )));
    }
    ensure_dir_exists(dst_parent)?;

    let name = src
        .file_name()
        .ok_or_else(|| KitError::invalid_argument(format!("no file name: {}", src.display())))?;
    let target = dst_parent.join(name);
    fs::rename(src, &target)?;
    tracing::info!("Moved {} -> {}", src.display(), target.display());
    Ok(())
}

/// Move the direct children of `src_dir` into `dst_dir`.
pub fn move_files<P: AsRef<Path>, Q: AsRef<Path>>(src_dir: P, dst_dir: Q) -> Result<()> {
    let (src_dir, dst_dir) = (src_dir.as_ref(), dst_dir.as_ref());
    if !src_dir.is_dir() {
        return Err(KitError::invalid_argument(format!(
            "source directory does not exist: {}",
            src_dir.display()
        )));
    }
    ensure_dir_exists(dst_dir)?;

    for entry in fs::read_dir(src_dir)? {
        let entry = entry?;
        fs::rename(entry.path(), dst_dir.join(entry.file_name()))?;
    }
    Ok(())
}

pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> Result<()> {
    fs::rename(from, to)?;
    Ok(())
}

pub fn file_exist<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Write `content`, replacing the file and creating its directory.
pub fn file_put_contents<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn file_get_contents<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn file_append_content<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new().append(true).open(path.as_ref())?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn line_matches(line: &str, pattern: &str) -> bool {
    remove_space(line).starts_with(&remove_space(pattern))
}

fn insert_at_first_match<P: AsRef<Path>>(
    path: P,
    pattern: &str,
    content: &str,
    above: bool,
) -> Result<()> {
    let path = path.as_ref();
    let original = fs::read_to_string(path)?;

    let mut inserted = false;
    let mut output = String::with_capacity(original.len() + content.len() + 1);
    for line in original.lines() {
        let hit = !inserted && line_matches(line, pattern);
        if hit && above {
            output.push_str(content);
            output.push('\n');
        }
        output.push_str(line);
        output.push('\n');
        if hit && !above {
            output.push_str(content);
            output.push('\n');
        }
        inserted |= hit;
    }

    fs::write(path, output)?;
    Ok(())
}

/// Insert `content` as a line before the first line starting with `pattern`.
/// Whitespace is ignored on both sides of the comparison.
pub fn add_content_above_line<P: AsRef<Path>>(path: P, pattern: &str, content: &str) -> Result<()> {
    insert_at_first_match(path, pattern, content, true)
}

pub fn add_content_under_line<P: AsRef<Path>>(path: P, pattern: &str, content: &str) -> Result<()> {
    insert_at_first_match(path, pattern, content, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_path() {
        let tmp = TempDir::new().unwrap();
        let as_dir = tmp.path().join("logs/daily");
        let as_file = tmp.path().join("conf/app.toml");

        create_path(&as_dir, false).unwrap();
        create_path(&as_file, false).unwrap();
        assert!(as_dir.is_dir());
        assert!(as_file.is_file());

        assert!(create_path(&as_file, false).is_err());
        assert!(create_path(&as_file, true).is_ok());
    }

    #[test]
    fn test_copy_file_overwrite() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("out/dst.txt");
        fs::write(&src, "hello").unwrap();

        copy_file(&src, &dst, false).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");

        fs::write(&src, "again").unwrap();
        assert!(copy_file(&src, &dst, false).is_err());
        copy_file(&src, &dst, true).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "again");
    }

    #[test]
    fn test_copy_and_move_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join("nested/b.txt"), "b").unwrap();

        let copied = tmp.path().join("copied");
        copy_files(&src, &copied, false).unwrap();
        assert_eq!(fs::read_to_string(copied.join("nested/b.txt")).unwrap(), "b");

        let moved = tmp.path().join("moved");
        move_files(&copied, &moved).unwrap();
        assert!(moved.join("a.txt").is_file());
        assert!(moved.join("nested/b.txt").is_file());
        assert!(!copied.join("a.txt").exists());

        let parent = tmp.path().join("parent");
        move_dir(&src, &parent).unwrap();
        assert!(parent.join("src/a.txt").is_file());
        assert!(move_dir(&src, &parent).is_err());
    }

    #[test]
    fn test_put_get_append() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep/notes.txt");

        file_put_contents(&path, "one\n").unwrap();
        file_append_content(&path, "two\n").unwrap();
        assert_eq!(file_get_contents(&path).unwrap(), "one\ntwo\n");
        assert!(file_append_content(tmp.path().join("missing.txt"), "x").is_err());

        delete_file(&path).unwrap();
        assert!(!file_exist(&path));
        assert!(delete_file(&path).is_err());
    }

    #[test]
    fn test_add_content_inserts_once() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("routes.rs");
        fs::write(&path, "fn a() {}\n    // routes\n// routes\nfn b() {}\n").unwrap();

        add_content_above_line(&path, "//routes", "// above").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "fn a() {}\n// above\n    // routes\n// routes\nfn b() {}\n"
        );

        add_content_under_line(&path, "fn a", "// under").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "fn a() {}\n// under\n// above\n    // routes\n// routes\nfn b() {}\n"
        );
    }
}
