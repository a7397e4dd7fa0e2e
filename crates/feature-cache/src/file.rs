//! Artifact Files
//!
//! Pretty JSON output with atomic replacement of the target file.

use crate::CacheError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Render `data` as UTF-8 JSON indented with four spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<String, CacheError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize `data` as pretty JSON and write it to `path`
pub fn save_file<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<(), CacheError> {
    let path = path.as_ref();
    let json = to_pretty_json(data)?;
    write_atomic(path, json.as_bytes())?;
    info!("Saved {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Read a JSON document written by [`save_file`]
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, CacheError> {
    let content = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Write to a sibling temp file, then rename over the target
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut file = fs::File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let mut data = BTreeMap::new();
        data.insert("rating", 4.5);

        let json = to_pretty_json(&data).unwrap();
        assert_eq!(json, "{\n    \"rating\": 4.5\n}");
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii() {
        let mut data = BTreeMap::new();
        data.insert("title", "Amélie");

        let json = to_pretty_json(&data).unwrap();
        assert!(json.contains("Amélie"));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("features.json");

        let mut data = BTreeMap::new();
        data.insert("1".to_string(), vec![1, 2, 3]);
        save_file(&path, &data).unwrap();

        let loaded: BTreeMap<String, Vec<i32>> = load_file(&path).unwrap();
        assert_eq!(loaded, data);

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!Path::new(&tmp).exists());
    }

    #[test]
    fn test_save_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        save_file(&path, &vec![1]).unwrap();
        save_file(&path, &vec![2]).unwrap();

        let loaded: Vec<i32> = load_file(&path).unwrap();
        assert_eq!(loaded, vec![2]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<i32>, _> = load_file(dir.path().join("missing.json"));
        assert!(matches!(result, Err(CacheError::Io(_))));
    }
}
