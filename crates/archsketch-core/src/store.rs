//! Transient storage for generated diagrams, owned by the outer layer.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::model::ArchitectureGraph;

pub trait DiagramStore: Send + Sync {
    fn save(&self, id: &str, graph: ArchitectureGraph) -> Result<(), StoreError>;
    fn load(&self, id: &str) -> Result<ArchitectureGraph, StoreError>;
    /// Stored ids, sorted.
    fn list(&self) -> Result<Vec<String>, StoreError>;
    fn remove(&self, id: &str) -> Result<(), StoreError>;

    /// Load, mutate and save back under one id.
    fn update<F>(&self, id: &str, f: F) -> Result<ArchitectureGraph, StoreError>
    where
        F: FnOnce(&mut ArchitectureGraph) -> Result<(), StoreError>,
        Self: Sized,
    {
        let mut graph = self.load(id)?;
        f(&mut graph)?;
        self.save(id, graph.clone())?;
        Ok(graph)
    }
}

#[derive(Debug, Default)]
struct Diagrams {
    graphs: BTreeMap<String, ArchitectureGraph>,
    /// Highest `diagram-N` ever issued. Never decreases, so removed ids are
    /// not handed out again.
    issued: u64,
}

/// One mutex-guarded map. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Diagrams>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Diagrams>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Store `graph` under a fresh `diagram-N` id and return the id.
    pub fn insert(&self, graph: ArchitectureGraph) -> Result<String, StoreError> {
        let mut diagrams = self.lock()?;
        let highest = diagrams.graphs.keys().filter_map(|id| diagram_number(id)).max().unwrap_or(0);
        diagrams.issued = diagrams.issued.max(highest) + 1;
        let id = format!("diagram-{}", diagrams.issued);
        diagrams.graphs.insert(id.clone(), graph);
        Ok(id)
    }
}

impl DiagramStore for MemoryStore {
    fn save(&self, id: &str, graph: ArchitectureGraph) -> Result<(), StoreError> {
        self.lock()?.graphs.insert(id.to_string(), graph);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<ArchitectureGraph, StoreError> {
        self.lock()?
            .graphs
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock()?.graphs.keys().cloned().collect())
    }

    fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.lock()?
            .graphs
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update<F>(&self, id: &str, f: F) -> Result<ArchitectureGraph, StoreError>
    where
        F: FnOnce(&mut ArchitectureGraph) -> Result<(), StoreError>,
    {
        let mut diagrams = self.lock()?;
        let graph = diagrams
            .graphs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let mut draft = graph.clone();
        f(&mut draft)?;
        *graph = draft.clone();
        Ok(draft)
    }
}

fn diagram_number(id: &str) -> Option<u64> {
    id.strip_prefix("diagram-").and_then(|n| n.parse::<u64>().ok())
}

/// Next id of the form `diagram-{N}`, one past the highest existing N.
pub fn next_diagram_id<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let max = existing.into_iter().filter_map(diagram_number).max().unwrap_or(0);
    format!("diagram-{}", max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classify_and_generate;
    use crate::error::GraphError;

    #[test]
    fn ids_increment_past_the_highest() {
        assert_eq!(next_diagram_id([]), "diagram-1");
        assert_eq!(next_diagram_id(["diagram-2", "other", "diagram-10"]), "diagram-11");
    }

    #[test]
    fn insert_load_remove() {
        let store = MemoryStore::new();
        let a = store.insert(classify_and_generate("aws ec2", "auto")).unwrap();
        let b = store.insert(classify_and_generate("xyzzy", "auto")).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("diagram-1", "diagram-2"));
        assert_eq!(store.list().unwrap(), vec!["diagram-1", "diagram-2"]);
        assert_eq!(store.load(&a).unwrap().diagram_type, "aws_architecture");
        store.remove(&a).unwrap();
        assert!(matches!(store.load(&a), Err(StoreError::NotFound(_))));
        assert!(matches!(store.remove(&a), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn removed_ids_are_not_reissued() {
        let store = MemoryStore::new();
        store.insert(classify_and_generate("xyzzy", "auto")).unwrap();
        let second = store.insert(classify_and_generate("aws ec2", "auto")).unwrap();
        store.remove(&second).unwrap();
        let third = store.insert(classify_and_generate("gcp gke", "auto")).unwrap();
        assert_eq!(third, "diagram-3");
        assert!(matches!(store.load(&second), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn insert_skips_ids_saved_by_hand() {
        let store = MemoryStore::new();
        store.save("diagram-7", classify_and_generate("xyzzy", "auto")).unwrap();
        assert_eq!(store.insert(classify_and_generate("xyzzy", "auto")).unwrap(), "diagram-8");
    }

    #[test]
    fn failed_update_leaves_graph_untouched() {
        let store = MemoryStore::new();
        let id = store.insert(classify_and_generate("xyzzy", "auto")).unwrap();
        let result = store.update(&id, |g| {
            g.set_title("changed");
            Err(StoreError::Graph(GraphError::MissingIcon("x".into())))
        });
        assert!(result.is_err());
        assert_eq!(store.load(&id).unwrap().title, "System Architecture");

        let updated = store.update(&id, |g| {
            g.set_title("renamed");
            Ok(())
        });
        assert_eq!(updated.unwrap().title, "renamed");
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save("k", classify_and_generate("", "generic")).unwrap();
        assert_eq!(other.list().unwrap(), vec!["k"]);
    }
}
