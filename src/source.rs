use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Datastreams shorter than this are stubs, not MODS documents.
const MIN_MODS_LEN: usize = 10;

/// Raw MODS for one repository object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub pid: String,
    /// `None` when the stored datastream is a stub and the object should be skipped.
    pub mods: Option<String>,
}

impl SourceRecord {
    pub fn new(pid: impl Into<String>, mods: String) -> Self {
        let mods = if mods.trim().len() < MIN_MODS_LEN {
            None
        } else {
            Some(mods)
        };
        SourceRecord {
            pid: pid.into(),
            mods,
        }
    }
}

/// Anything that can hand out MODS keyed by object identifier.
pub trait ModsSource {
    fn records(&self) -> Result<Vec<SourceRecord>>;
}

/// MODS files on disk: a single `.xml` file, or every `.xml` file directly in a directory.
///
/// The PID is the file stem, so `islandora:123.xml` is object `islandora:123`.
pub struct DirectorySource {
    path: PathBuf,
}

impl DirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DirectorySource { path: path.into() }
    }
}

impl ModsSource for DirectorySource {
    fn records(&self) -> Result<Vec<SourceRecord>> {
        if self.path.is_file() {
            return Ok(vec![read_record(&self.path)?]);
        }

        let entries = std::fs::read_dir(&self.path)
            .with_context(|| format!("reading directory {}", self.path.display()))?;

        let files = xml_files(&self.path, entries.map(|entry| entry.map(|e| e.path())))?;
        files.iter().map(|p| read_record(p)).collect()
    }
}

/// Sorted `.xml` files among `entries`; an entry that could not be read fails the scan.
fn xml_files(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("reading an entry of {}", dir.display()))?;
        if path.is_file() && is_xml(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

fn read_record(path: &Path) -> Result<SourceRecord> {
    let mods = std::fs::read_to_string(path)
        .with_context(|| format!("reading MODS file {}", path.display()))?;
    let pid = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SourceRecord::new(pid, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_datastreams_are_skipped() {
        assert_eq!(SourceRecord::new("a:1", "  <mods/> ".to_string()).mods, None);
        assert!(SourceRecord::new("a:1", "<mods><genre>x</genre></mods>".to_string())
            .mods
            .is_some());
    }

    #[test]
    fn test_directory_source_sorted_xml_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("demo-2.xml"), "<mods><genre>b</genre></mods>").unwrap();
        std::fs::write(dir.path().join("demo-1.XML"), "<mods><genre>a</genre></mods>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not mods").unwrap();
        std::fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let records = DirectorySource::new(dir.path()).records().unwrap();
        let pids: Vec<&str> = records.iter().map(|r| r.pid.as_str()).collect();
        assert_eq!(pids, vec!["demo-1", "demo-2"]);
    }

    #[test]
    fn test_single_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("msvu_42.xml");
        std::fs::write(&file, "<mods><genre>a</genre></mods>").unwrap();

        let records = DirectorySource::new(&file).records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pid, "msvu_42");
    }

    #[test]
    fn test_unreadable_entry_fails_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("demo-1.xml");
        std::fs::write(&good, "<mods><genre>a</genre></mods>").unwrap();

        let entries = vec![
            Ok(good.clone()),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        ];
        let err = xml_files(dir.path(), entries).unwrap_err();
        assert!(err.to_string().contains("reading an entry of"));

        assert_eq!(xml_files(dir.path(), vec![Ok(good.clone())]).unwrap(), vec![good]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DirectorySource::new(dir.path().join("absent")).records().is_err());
    }
}
