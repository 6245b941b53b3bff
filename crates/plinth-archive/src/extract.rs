use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::{ArchiveFormat, TarCompress, detect_format};
use crate::sanitize::{sanitize_entry_name, sanitize_link_target};

/// What a successful extraction wrote.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractSummary {
    pub entries: usize,
    pub total_bytes: u64,
}

/// Extract an untrusted bundle into `destination`, all-or-nothing.
///
/// The format is detected from magic bytes, then every entry's stored name
/// (and every symlink target) is validated before a single byte is written.
/// A bundle with one unsafe entry is rejected whole and the destination is
/// left untouched.
pub fn extract_archive(bytes: &[u8], destination: &Path) -> Result<ExtractSummary> {
    let format = detect_format(bytes).ok_or(Error::UnsupportedFormat)?;
    match format {
        ArchiveFormat::Zip => extract_zip(bytes, destination),
        ArchiveFormat::Tar(codec) => extract_tar(bytes, codec, destination),
    }
}

fn extract_zip(bytes: &[u8], destination: &Path) -> Result<ExtractSummary> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|_| Error::Corrupted)?;

    // Validation pass over every stored name.
    let names: Vec<String> = archive.file_names().map(str::to_owned).collect();
    for name in &names {
        sanitize_entry_name(name)?;
    }

    let mut summary = ExtractSummary::default();
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|_| Error::Corrupted)?;
        let raw = file.name().to_owned();
        let Some(rel) = sanitize_entry_name(&raw)? else {
            continue;
        };
        let target = destination.join(rel);

        if file.is_dir() {
            ensure_directory(&target)?;
        } else {
            summary.total_bytes += write_file(&mut file, &target)?;
            summary.entries += 1;
        }
    }

    Ok(summary)
}

fn extract_tar(bytes: &[u8], codec: TarCompress, destination: &Path) -> Result<ExtractSummary> {
    // Validation pass: walk every header before anything lands on disk.
    let mut archive = tar::Archive::new(codec.decoder(Cursor::new(bytes)));
    for entry in archive.entries().map_err(|_| Error::Corrupted)? {
        let entry = entry.map_err(|_| Error::Corrupted)?;
        let raw = entry_name(&entry)?;
        let rel = sanitize_entry_name(&raw)?;

        if entry.header().entry_type().is_symlink() {
            let rel = rel.ok_or(Error::InvalidPath)?;
            let target = link_target(&entry)?;
            sanitize_link_target(&target, &rel, &raw)?;
        }
    }

    // Write pass over a fresh reader.
    let mut archive = tar::Archive::new(codec.decoder(Cursor::new(bytes)));
    let mut summary = ExtractSummary::default();
    for entry in archive.entries().map_err(|_| Error::Corrupted)? {
        let mut entry = entry.map_err(|_| Error::Corrupted)?;
        let raw = entry_name(&entry)?;
        let Some(rel) = sanitize_entry_name(&raw)? else {
            continue;
        };
        let target = destination.join(rel);

        let kind = entry.header().entry_type();
        if kind.is_dir() {
            ensure_directory(&target)?;
        } else if kind.is_file() {
            summary.total_bytes += write_file(&mut entry, &target)?;
            summary.entries += 1;
        } else if kind.is_symlink() {
            let link = link_target(&entry)?;
            write_symlink(Path::new(&link), &target)?;
            summary.entries += 1;
        }
        // Hard links, fifos, and device nodes have no place in a static
        // site bundle and are skipped.
    }

    Ok(summary)
}

fn entry_name<R: Read>(entry: &tar::Entry<'_, R>) -> Result<String> {
    String::from_utf8(entry.path_bytes().into_owned()).map_err(|_| Error::InvalidPath)
}

fn link_target<R: Read>(entry: &tar::Entry<'_, R>) -> Result<String> {
    let target = entry
        .link_name()
        .map_err(|_| Error::InvalidPath)?
        .ok_or(Error::InvalidPath)?;
    target
        .to_str()
        .map(str::to_owned)
        .ok_or(Error::InvalidPath)
}

fn write_file<R: Read>(reader: &mut R, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_directory(parent)?;
    }

    let mut out = std::fs::File::create(target).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })?;
    std::io::copy(reader, &mut out).map_err(|e| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    })
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(unix)]
fn write_symlink(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        ensure_directory(parent)?;
    }
    std::os::unix::fs::symlink(target, link).map_err(|e| Error::SymlinkCreationFailed {
        path: link.to_path_buf(),
        source: e,
    })
}

#[cfg(windows)]
fn write_symlink(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        ensure_directory(parent)?;
    }
    std::os::windows::fs::symlink_file(target, link).map_err(|e| Error::SymlinkCreationFailed {
        path: link.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undetectable_bytes_fail_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_archive(b"plain text, not an archive", dir.path());
        assert!(matches!(result, Err(Error::UnsupportedFormat)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn truncated_zip_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_archive(&[0x50, 0x4B, 0x03, 0x04, 0x00], dir.path());
        assert!(matches!(result, Err(Error::Corrupted)));
    }
}
