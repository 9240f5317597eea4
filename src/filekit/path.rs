use crate::utils::error::Result;
use bitflags::bitflags;
use std::fs;
use std::path::{Path, PathBuf};

bitflags! {
    /// Parts of a path `pathinfo` should fill in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PathInfoFlags: u8 {
        const DIRNAME = 1;
        const BASENAME = 1 << 1;
        const EXTENSION = 1 << 2;
        const FILENAME = 1 << 3;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathInfo {
    pub dirname: Option<String>,
    pub basename: Option<String>,
    pub extension: Option<String>,
    pub filename: Option<String>,
}

pub fn getwd() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Everything but the last element, `"."` for a bare name.
pub fn dir(path: &str) -> String {
    match Path::new(path).parent() {
        Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
        Some(parent) => parent.to_string_lossy().into_owned(),
        None if path.starts_with('/') => "/".to_string(),
        None => ".".to_string(),
    }
}

pub fn path_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    match fs::metadata(path.as_ref()) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path.as_ref())
        .map(|m| !m.is_dir())
        .unwrap_or(false)
}

pub fn get_suffix(file_name: &str) -> String {
    crate::strkit::get_suffix(file_name)
}

/// Every file and directory under `root`, depth first. `root` itself is not listed.
pub fn scandir<P: AsRef<Path>>(root: P) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    walk(root.as_ref(), &mut files, &mut dirs)?;
    Ok((files, dirs))
}

fn walk(current: &Path, files: &mut Vec<PathBuf>, dirs: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            dirs.push(path.clone());
            walk(&path, files, dirs)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Absolute form of `path`. The path does not have to exist.
pub fn realpath<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

pub fn basename(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    match Path::new(path).file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None if path.chars().all(|c| c == '/') => "/".to_string(),
        None => path.to_string(),
    }
}

pub fn glob(pattern: &str) -> Result<Vec<PathBuf>> {
    Ok(glob::glob(pattern)?.filter_map(|entry| entry.ok()).collect())
}

/// Split a path into its components. A leading dot starts the extension,
/// so `.bashrc` has extension `bashrc` and an empty filename.
pub fn pathinfo(path: &str, flags: PathInfoFlags) -> PathInfo {
    let mut info = PathInfo::default();
    let base = basename(path);

    if flags.contains(PathInfoFlags::DIRNAME) {
        info.dirname = Some(dir(path));
    }
    if flags.contains(PathInfoFlags::BASENAME) {
        info.basename = Some(base.clone());
    }
    if flags.intersects(PathInfoFlags::EXTENSION | PathInfoFlags::FILENAME) {
        let (filename, extension) = match base.rfind('.') {
            Some(p) => (base[..p].to_string(), base[p + 1..].to_string()),
            None => (base.clone(), String::new()),
        };
        if flags.contains(PathInfoFlags::EXTENSION) {
            info.extension = Some(extension);
        }
        if flags.contains(PathInfoFlags::FILENAME) {
            info.filename = Some(filename);
        }
    }
    info
}
