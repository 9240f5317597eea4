use crate::utils::error::Result;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

/// Pack everything under `src_dir` into `dst_zip`.
///
/// Entry names are relative to `src_dir` and always `/`-separated. When the
/// archive itself lives inside `src_dir` it is left out.
pub fn zip_directory<P: AsRef<Path>, Q: AsRef<Path>>(src_dir: P, dst_zip: Q) -> Result<()> {
    let (src_dir, dst_zip) = (src_dir.as_ref(), dst_zip.as_ref());
    tracing::debug!("Zipping {} into {}", src_dir.display(), dst_zip.display());

    let file = File::create(dst_zip)?;
    let target = fs::canonicalize(dst_zip)?;
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut zip = ZipWriter::new(file);
    let mut entries = 0usize;
    add_entries(&mut zip, src_dir, src_dir, &target, options, &mut entries)?;
    zip.finish()?;

    tracing::info!("Wrote {} entries to {}", entries, dst_zip.display());
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn add_entries(
    zip: &mut ZipWriter<File>,
    root: &Path,
    current: &Path,
    target: &Path,
    options: SimpleFileOptions,
    entries: &mut usize,
) -> Result<()> {
    let mut children = fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<PathBuf>>>()?;
    children.sort();

    for path in children {
        let name = entry_name(root, &path);
        if path.is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
            *entries += 1;
            add_entries(zip, root, &path, target, options, entries)?;
            continue;
        }

        if fs::canonicalize(&path).map(|p| p == target).unwrap_or(false) {
            continue;
        }

        zip.start_file(name, options)?;
        let mut source = File::open(&path)?;
        io::copy(&mut source, zip)?;
        zip.flush()?;
        *entries += 1;
    }
    Ok(())
}

pub fn zip_open<P: AsRef<Path>>(path: P) -> Result<ZipArchive<File>> {
    let file = File::open(path.as_ref())?;
    Ok(ZipArchive::new(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_zip_directory_skips_itself() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path();
        fs::create_dir_all(src.join("assets/img")).unwrap();
        fs::write(src.join("index.html"), "<html></html>").unwrap();
        fs::write(src.join("assets/img/logo.svg"), "<svg/>").unwrap();

        let dst = src.join("dist.zip");
        zip_directory(src, &dst).unwrap();

        let mut archive = zip_open(&dst).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["assets/", "assets/img/", "assets/img/logo.svg", "index.html"]
        );

        let mut content = String::new();
        archive
            .by_name("assets/img/logo.svg")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<svg/>");
    }

    #[test]
    fn test_zip_open_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("not.zip");
        fs::write(&path, "plain text").unwrap();
        assert!(zip_open(&path).is_err());
    }
}
