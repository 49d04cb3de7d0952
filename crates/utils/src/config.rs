use crate::error::Error;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

/// Makes `path` absolute (relative paths are taken from the current
/// directory) and creates its parent directory if needed.
pub fn resolve_path<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let path_buf = if path.as_ref().is_absolute() {
        path.as_ref().to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if let Some(parent) = path_buf.parent().filter(|p| !p.exists()) {
        fs::create_dir_all(parent)?;
    }
    Ok(path_buf)
}

/// Reads a JSON file. A missing file is `Ok(None)`; a file that exists but
/// cannot be parsed is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, Error> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    let value = serde_json::from_reader::<_, T>(io::BufReader::new(file))?;
    Ok(Some(value))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        name: String,
        limit: u64,
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            name: "proposer".to_string(),
            limit: 100,
        };

        write_json(&path, &settings).unwrap();
        assert_eq!(read_json::<Settings>(&path).unwrap(), Some(settings));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(read_json::<Settings>(&path).unwrap(), None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(read_json::<Settings>(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_resolve_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_path(dir.path().join("a").join("b").join("c.json")).unwrap();
        assert!(path.parent().unwrap().exists());
        assert!(!path.exists());
    }
}
