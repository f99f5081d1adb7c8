use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::artifact::DownloadArtifact;

/// In-memory store handing converted files to the invoking session.
///
/// Artifacts live for the lifetime of the process only; persistence
/// across sessions is a stated non-goal.
#[derive(Default)]
pub struct ArtifactStore {
    artifacts: Mutex<HashMap<Uuid, DownloadArtifact>>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an artifact and return the id the session retrieves it by.
    pub fn insert(&self, artifact: DownloadArtifact) -> Uuid {
        let id = Uuid::new_v4();
        self.artifacts.lock().unwrap().insert(id, artifact);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<DownloadArtifact> {
        self.artifacts.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.artifacts.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let store = ArtifactStore::new();
        let id = store.insert(DownloadArtifact::new("out.csv", "text/csv", vec![1, 2, 3]));

        let artifact = store.get(&id).unwrap();
        assert_eq!(artifact.file_name, "out.csv");
        assert_eq!(artifact.size_bytes(), 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id_is_none() {
        let store = ArtifactStore::new();
        assert!(store.get(&Uuid::new_v4()).is_none());
    }
}
