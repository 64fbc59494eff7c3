use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default session file, written next to the working directory.
pub const SESSION_FILE: &str = ".deblur-session.json";

/// The page the user was last on, persisted between runs. This is the
/// location-fragment analogue: startup reads it to decide the first
/// visible page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub page: String,
}

pub struct SessionRepository;

impl SessionRepository {
    pub fn save(session: &Session, filename: &str) -> Result<String, String> {
        match serde_json::to_string_pretty(session) {
            Ok(json) => match fs::write(filename, &json) {
                Ok(_) => Ok(filename.to_string()),
                Err(e) => Err(e.to_string()),
            },
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }

    pub fn load(filename: &str) -> Result<Session, String> {
        match fs::read_to_string(filename) {
            Ok(content) => match serde_json::from_str::<Session>(&content) {
                Ok(session) => Ok(session),
                Err(e) => Err(format!("Invalid session file - {}", e)),
            },
            Err(e) => Err(e.to_string()),
        }
    }
}

pub struct ImageRepository;

impl ImageRepository {
    /// Reads a picked image from disk, returning its display name and
    /// raw bytes. The content is treated as opaque.
    pub fn read_image(path: &str) -> Result<(String, Vec<u8>), String> {
        match fs::read(path) {
            Ok(bytes) => {
                let name = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                Ok((name, bytes))
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let path = path.to_str().unwrap();

        let session = Session {
            page: "upload".to_string(),
        };
        let saved = SessionRepository::save(&session, path).unwrap();
        assert_eq!(saved, path);

        let loaded = SessionRepository::load(path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_session_load_missing_file() {
        assert!(SessionRepository::load("/nonexistent/session.json").is_err());
    }

    #[test]
    fn test_session_load_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = SessionRepository::load(path.to_str().unwrap()).unwrap_err();
        assert!(err.contains("Invalid session file"));
    }

    #[test]
    fn test_read_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let (name, bytes) = ImageRepository::read_image(path.to_str().unwrap()).unwrap();
        assert_eq!(name, "cat.png");
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_image_missing_file() {
        assert!(ImageRepository::read_image("/nonexistent/cat.png").is_err());
    }
}
