//! Device identity provider.
//!
//! Issues and persists the per-device opaque token used as the reaction
//! actor key. The token is generated once, stored under a well-known key in
//! a local directory, and reused for every later session. It is a
//! correlation token only - the server never validates it and it grants
//! nothing.

use std::fs;
use std::io;
use std::path::PathBuf;

use murmur_core::value_objects::DeviceId;
use uuid::Uuid;

/// Well-known key (file name) the device identifier lives under
pub const DEVICE_ID_KEY: &str = "murmur_device_id";

/// File-backed store for the device identifier
#[derive(Debug, Clone)]
pub struct DeviceStore {
    path: PathBuf,
}

impl DeviceStore {
    /// Open a store rooted at `dir`. The directory is created on first
    /// write, not here.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut path = dir.into();
        path.push(DEVICE_ID_KEY);
        Self { path }
    }

    /// Get the device id, creating and persisting one on first access.
    ///
    /// Never rotates: once a token exists it is returned as-is for the
    /// lifetime of the store directory.
    pub fn device_id(&self) -> io::Result<DeviceId> {
        match fs::read_to_string(&self.path) {
            Ok(existing) => {
                let token = existing.trim();
                if !token.is_empty() {
                    return Ok(DeviceId::new(token));
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }

        let token = Uuid::new_v4().to_string();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &token)?;
        Ok(DeviceId::new(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("murmur-device-test-{tag}-{}", Uuid::new_v4()));
        dir
    }

    #[test]
    fn test_first_access_creates_and_persists() {
        let dir = temp_dir("create");
        let store = DeviceStore::open(&dir);

        let first = store.device_id().unwrap();
        assert!(!first.is_empty());

        // A second store over the same directory sees the same token
        let again = DeviceStore::open(&dir).device_id().unwrap();
        assert_eq!(first, again);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_blank_file_is_replaced() {
        let dir = temp_dir("blank");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DEVICE_ID_KEY), "  \n").unwrap();

        let token = DeviceStore::open(&dir).device_id().unwrap();
        assert!(!token.is_empty());

        fs::remove_dir_all(&dir).ok();
    }
}
