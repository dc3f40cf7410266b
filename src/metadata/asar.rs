//! Read-only access to Electron `.asar` archives.
//!
//! Layout: an 8-byte pickle holding the header size, then a pickled JSON
//! header describing the file tree, then the concatenated file contents.
//! File offsets in the header are relative to the end of the header and are
//! stored as decimal strings.

use crate::bundler::error::{Error, ErrorExt, Result};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

/// Upper bound on the JSON header; real archives stay far below this.
const MAX_HEADER_SIZE: u32 = 64 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct Directory {
    files: BTreeMap<String, Entry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entry {
    Directory(Directory),
    File(FileEntry),
    Link {
        #[allow(dead_code)]
        link: String,
    },
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    size: u64,
    #[serde(default)]
    offset: Option<String>,
    #[serde(default)]
    unpacked: bool,
}

/// An opened asar archive with its header parsed.
#[derive(Debug)]
pub struct AsarArchive {
    path: PathBuf,
    root: Directory,
    data_offset: u64,
}

impl AsarArchive {
    /// Open `path` and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path).fs_context("opening asar archive", path)?;

        let size_pickle = read_u32_pair(&mut file, path)?;
        if size_pickle.0 != 4 {
            return Err(invalid(path, "unexpected size pickle"));
        }
        let header_size = size_pickle.1;
        if !(8..=MAX_HEADER_SIZE).contains(&header_size) {
            return Err(invalid(path, format!("implausible header size {header_size}")));
        }

        let mut header = vec![0u8; header_size as usize];
        file.read_exact(&mut header)
            .fs_context("reading asar header", path)?;

        let json_len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        let json = header
            .get(8..8 + json_len)
            .ok_or_else(|| invalid(path, "header string overruns header"))?;
        let root: Directory = serde_json::from_slice(json)?;

        Ok(Self {
            path: path.to_path_buf(),
            root,
            data_offset: 8 + u64::from(header_size),
        })
    }

    /// Read the file stored at `name` (`/`-separated) inside the archive.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let entry = self.lookup(name)?;

        if entry.unpacked {
            let mut unpacked = self.path.as_os_str().to_owned();
            unpacked.push(".unpacked");
            let on_disk = name
                .split('/')
                .fold(PathBuf::from(unpacked), |acc, part| acc.join(part));
            return std::fs::read(&on_disk).fs_context("reading unpacked asar entry", on_disk);
        }

        let offset: u64 = entry
            .offset
            .as_deref()
            .ok_or_else(|| invalid(&self.path, format!("{name} has no offset")))?
            .parse()
            .map_err(|_| invalid(&self.path, format!("{name} has a non-numeric offset")))?;

        let mut file = File::open(&self.path).fs_context("opening asar archive", &self.path)?;
        let archive_len = file
            .metadata()
            .fs_context("reading asar archive metadata", &self.path)?
            .len();
        let start = self
            .data_offset
            .checked_add(offset)
            .filter(|start| *start <= archive_len)
            .ok_or_else(|| invalid(&self.path, format!("{name} starts past the end of the archive")))?;
        let len = start
            .checked_add(entry.size)
            .filter(|end| *end <= archive_len)
            .and_then(|_| usize::try_from(entry.size).ok())
            .ok_or_else(|| invalid(&self.path, format!("{name} extends past the end of the archive")))?;

        file.seek(SeekFrom::Start(start))
            .fs_context("seeking in asar archive", &self.path)?;
        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf)
            .fs_context("reading asar entry", &self.path)?;
        Ok(buf)
    }

    fn lookup(&self, name: &str) -> Result<&FileEntry> {
        let mut dir = &self.root;
        let mut parts = name.split('/').filter(|p| !p.is_empty()).peekable();

        while let Some(part) = parts.next() {
            let entry = dir
                .files
                .get(part)
                .ok_or_else(|| invalid(&self.path, format!("{name} not found")))?;
            match (entry, parts.peek().is_some()) {
                (Entry::Directory(sub), true) => dir = sub,
                (Entry::File(file), false) => return Ok(file),
                (Entry::Link { .. }, _) => {
                    return Err(invalid(&self.path, format!("{name} is a link")));
                }
                _ => return Err(invalid(&self.path, format!("{name} is not a file"))),
            }
        }

        Err(invalid(&self.path, "empty entry name"))
    }
}

fn read_u32_pair(file: &mut File, path: &Path) -> Result<(u32, u32)> {
    let mut buf = [0u8; 8];
    file.read_exact(&mut buf)
        .fs_context("reading asar size header", path)?;
    Ok((
        u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
        u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
    ))
}

fn invalid(path: &Path, reason: impl Into<String>) -> Error {
    Error::InvalidArchive {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Writes an asar archive; only used to build test fixtures.
#[cfg(test)]
pub(crate) fn write_archive(path: &Path, files: &[(&str, &[u8])]) {
    let mut entries = serde_json::Map::new();
    let mut data = Vec::new();
    for (name, content) in files {
        entries.insert(
            name.to_string(),
            serde_json::json!({ "size": content.len(), "offset": data.len().to_string() }),
        );
        data.extend_from_slice(content);
    }
    let json = serde_json::to_vec(&serde_json::json!({ "files": entries })).unwrap();
    write_raw_archive(path, &json, &data);
}

/// Writes an asar archive with a verbatim JSON header; only used by tests.
#[cfg(test)]
pub(crate) fn write_raw_archive(path: &Path, json: &[u8], data: &[u8]) {
    let mut payload = (json.len() as u32).to_le_bytes().to_vec();
    payload.extend_from_slice(json);
    while payload.len() % 4 != 0 {
        payload.push(0);
    }
    let mut header = (payload.len() as u32).to_le_bytes().to_vec();
    header.extend_from_slice(&payload);

    let mut out = 4u32.to_le_bytes().to_vec();
    out.extend_from_slice(&(header.len() as u32).to_le_bytes());
    out.extend_from_slice(&header);
    out.extend_from_slice(data);
    std::fs::write(path, out).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_file_from_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.asar");
        write_archive(
            &path,
            &[("main.js", b"console.log(1)"), ("package.json", b"{\"name\":\"packed\"}")],
        );

        let archive = AsarArchive::open(&path).unwrap();
        assert_eq!(archive.read_file("package.json").unwrap(), b"{\"name\":\"packed\"}");
        assert_eq!(archive.read_file("main.js").unwrap(), b"console.log(1)");
    }

    #[test]
    fn test_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.asar");
        write_archive(&path, &[("main.js", b"")]);

        let err = AsarArchive::open(&path)
            .unwrap()
            .read_file("package.json")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArchive { .. }));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.asar");
        std::fs::write(&path, b"definitely not an archive").unwrap();
        assert!(AsarArchive::open(&path).is_err());
    }

    #[test]
    fn test_unpacked_entry_reads_sidecar_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.asar");
        let json = br#"{"files":{"native":{"files":{"addon.node":{"size":3,"unpacked":true}}}}}"#;
        write_raw_archive(&path, json, b"");

        let sidecar = dir.path().join("app.asar.unpacked").join("native");
        std::fs::create_dir_all(&sidecar).unwrap();
        std::fs::write(sidecar.join("addon.node"), b"bin").unwrap();

        let archive = AsarArchive::open(&path).unwrap();
        assert_eq!(archive.read_file("native/addon.node").unwrap(), b"bin");
    }

    #[test]
    fn test_offset_overflow_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.asar");
        let json = br#"{"files":{"package.json":{"size":2,"offset":"18446744073709551615"}}}"#;
        write_raw_archive(&path, json, b"{}");

        let err = AsarArchive::open(&path)
            .unwrap()
            .read_file("package.json")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArchive { .. }));
    }

    #[test]
    fn test_oversized_entry_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.asar");
        let json = br#"{"files":{"package.json":{"size":9223372036854775807,"offset":"0"}}}"#;
        write_raw_archive(&path, json, b"{}");

        let err = AsarArchive::open(&path)
            .unwrap()
            .read_file("package.json")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArchive { .. }));
    }

    #[test]
    fn test_entry_running_past_end_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.asar");
        let json = br#"{"files":{"package.json":{"size":3,"offset":"1"}}}"#;
        write_raw_archive(&path, json, b"{}");

        let err = AsarArchive::open(&path)
            .unwrap()
            .read_file("package.json")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArchive { .. }));
    }
}
