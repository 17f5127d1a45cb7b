//! Archive packer and unpacker.
//!
//! An archive is one zip container whose entries are flat `<table>.csv` text
//! members. Packing stages already-encoded member files into the container;
//! unpacking extracts every entry into a scratch directory, rejecting entry
//! names that would escape it.

use std::fs::File;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ArchiveError;

/// Pack the given member files into a zip container at `zip_path`.
///
/// Entry names are the members' file names; directories are never created
/// inside the container.
pub fn pack(members: &[PathBuf], zip_path: &Path) -> Result<(), ArchiveError> {
    let file = File::create(zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for member in members {
        let name = member
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ArchiveError::UnsafeEntryName {
                entry: member.display().to_string(),
            })?;

        writer.start_file(name, options)?;
        let contents = std::fs::read(member)?;
        writer.write_all(&contents)?;
    }

    writer.finish()?;
    Ok(())
}

/// Extract every member of the archive in `bytes` into `dest`.
///
/// Returns the extracted member names. Entry names are validated against
/// zip-slip: anything that resolves outside `dest` is rejected.
pub fn unpack(bytes: &[u8], dest: &Path) -> Result<Vec<String>, ArchiveError> {
    let mut container = ZipArchive::new(Cursor::new(bytes))?;
    let mut members = Vec::with_capacity(container.len());

    for index in 0..container.len() {
        let mut entry = container.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            return Err(ArchiveError::UnsafeEntryName {
                entry: entry.name().to_string(),
            });
        };

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        members.push(entry.name().to_string());
    }

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn packs_and_unpacks_members_byte_for_byte() {
        let scratch = tempfile::tempdir().unwrap();
        let members = vec![
            stage(scratch.path(), "items.csv", "id,name\n\"1\",\"bolt\""),
            stage(scratch.path(), "sales.csv", "id,qty\n\"1\",\"3\""),
        ];
        let zip_path = scratch.path().join("backup.zip");
        pack(&members, &zip_path).unwrap();

        let out = tempfile::tempdir().unwrap();
        let bytes = std::fs::read(&zip_path).unwrap();
        let mut names = unpack(&bytes, out.path()).unwrap();
        names.sort();
        assert_eq!(names, ["items.csv", "sales.csv"]);

        let restored = std::fs::read_to_string(out.path().join("items.csv")).unwrap();
        assert_eq!(restored, "id,name\n\"1\",\"bolt\"");
    }

    #[test]
    fn packs_empty_member_list_into_empty_container() {
        let scratch = tempfile::tempdir().unwrap();
        let zip_path = scratch.path().join("backup.zip");
        pack(&[], &zip_path).unwrap();

        let out = tempfile::tempdir().unwrap();
        let bytes = std::fs::read(&zip_path).unwrap();
        assert!(unpack(&bytes, out.path()).unwrap().is_empty());
    }

    #[test]
    fn rejects_entry_names_escaping_the_destination() {
        // Hand-build a container with a traversal entry name.
        let mut raw = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut raw));
            writer
                .start_file("../escape.csv", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"id\n\"1\"").unwrap();
            writer.finish().unwrap();
        }

        let out = tempfile::tempdir().unwrap();
        let result = unpack(&raw, out.path());
        assert!(matches!(
            result,
            Err(ArchiveError::UnsafeEntryName { .. })
        ));
        assert!(!out.path().join("../escape.csv").exists());
    }

    #[test]
    fn garbage_bytes_fail_with_zip_error() {
        let out = tempfile::tempdir().unwrap();
        assert!(matches!(
            unpack(b"not a zip", out.path()),
            Err(ArchiveError::Zip(_))
        ));
    }
}
