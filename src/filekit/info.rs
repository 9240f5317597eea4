use crate::utils::error::{KitError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub is_dir: bool,
    pub readonly: bool,
    pub modified: Option<DateTime<Utc>>,
    /// Unix permission bits, zero on other platforms.
    pub mode: u32,
}

pub fn stat<P: AsRef<Path>>(path: P) -> Result<FileStat> {
    let meta = fs::metadata(path.as_ref())?;

    #[cfg(unix)]
    let mode = {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode()
    };
    #[cfg(not(unix))]
    let mode = 0;

    Ok(FileStat {
        size: meta.len(),
        is_dir: meta.is_dir(),
        readonly: meta.permissions().readonly(),
        modified: meta.modified().ok().map(DateTime::<Utc>::from),
        mode,
    })
}

pub fn filesize<P: AsRef<Path>>(path: P) -> Result<u64> {
    Ok(fs::metadata(path.as_ref())?.len())
}

/// Plain byte copy into `dest`, which is created or replaced.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<u64> {
    let mut reader = fs::File::open(source.as_ref())?;
    let mut writer = fs::File::create(dest.as_ref())?;
    Ok(std::io::copy(&mut reader, &mut writer)?)
}

pub fn is_readable<P: AsRef<Path>>(path: P) -> bool {
    fs::File::open(path.as_ref()).is_ok()
}

pub fn is_writeable<P: AsRef<Path>>(path: P) -> bool {
    fs::OpenOptions::new().write(true).open(path.as_ref()).is_ok()
}

/// Create the file if it does not exist. Existing content is kept.
pub fn touch<P: AsRef<Path>>(path: P) -> Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    Ok(())
}

#[cfg(unix)]
pub fn chmod<P: AsRef<Path>>(path: P, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path.as_ref(), fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn chmod<P: AsRef<Path>>(_path: P, _mode: u32) -> Result<()> {
    Err(KitError::invalid_argument("chmod is only supported on unix"))
}

/// Read every record of a delimited file. The first row is returned as data, not headers.
pub fn fgetcsv<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Vec<Vec<String>>> {
    if !delimiter.is_ascii() {
        return Err(KitError::invalid_argument(format!(
            "delimiter must be a single byte, got {:?}",
            delimiter
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}

/// Whether a MIME type (from a Content-Type header) names an image.
pub fn is_image(content_type: &str) -> bool {
    content_type.trim().starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stat_touch_copy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.txt");

        touch(&path).unwrap();
        assert_eq!(filesize(&path).unwrap(), 0);

        fs::write(&path, "12345").unwrap();
        touch(&path).unwrap();
        let info = stat(&path).unwrap();
        assert_eq!(info.size, 5);
        assert!(!info.is_dir);
        assert!(info.modified.is_some());

        let dest = tmp.path().join("b.txt");
        assert_eq!(copy(&path, &dest).unwrap(), 5);
        assert!(is_readable(&dest));
        assert!(is_writeable(&dest));
        assert!(!is_readable(tmp.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_chmod() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("run.sh");
        touch(&path).unwrap();
        chmod(&path, 0o754).unwrap();
        assert_eq!(stat(&path).unwrap().mode & 0o777, 0o754);
    }

    #[test]
    fn test_fgetcsv() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.csv");
        fs::write(&path, "id;name\n1;\"Smith; J\"\n2;Lee\n").unwrap();

        let rows = fgetcsv(&path, ';').unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["id", "name"]);
        assert_eq!(rows[1], vec!["1", "Smith; J"]);
        assert!(fgetcsv(&path, '，').is_err());
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("image/png"));
        assert!(is_image(" image/jpeg"));
        assert!(!is_image("application/pdf"));
        assert!(!is_image(""));
    }
}
