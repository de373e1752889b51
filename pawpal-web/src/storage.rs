use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use pawpal_game::{PetSnapshot, PetStorage, SnapshotError};

/// `localStorage`-backed snapshot store.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPetStorage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl PetStorage for WebPetStorage {
    type Error = WebStorageError;

    fn save_pet(&self, key: &str, snapshot: &PetSnapshot) -> Result<(), Self::Error> {
        LocalStorage::set(key, snapshot).map_err(|e| WebStorageError::Storage(format!("{e:?}")))
    }

    fn load_pet(&self, key: &str) -> Result<Option<PetSnapshot>, Self::Error> {
        match LocalStorage::get::<PetSnapshot>(key) {
            Ok(snapshot) => {
                snapshot.validate()?;
                Ok(Some(snapshot))
            }
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(err)) => Err(SnapshotError::Json(err).into()),
            Err(err) => Err(WebStorageError::Storage(format!("{err:?}"))),
        }
    }

    fn delete_pet(&self, key: &str) -> Result<(), Self::Error> {
        LocalStorage::delete(key);
        Ok(())
    }
}
