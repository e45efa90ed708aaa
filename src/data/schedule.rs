//! Shooting schedule store
//!
//! The in-memory sequence is the single source of truth; the persisted
//! row and the rendered strips are derived projections, rewritten after
//! every mutation.

use rusqlite::Result as SqliteResult;
use uuid::Uuid;

use super::models::{Scene, SceneDraft};
use super::state::{StateStore, SCHEDULE_KEY};

pub struct ScheduleStore {
    state: StateStore,
    scenes: Vec<Scene>,
}

impl ScheduleStore {
    pub fn new(state: StateStore) -> Self {
        Self {
            state,
            scenes: Vec::new(),
        }
    }

    /// Read the persisted sequence, replacing the in-memory one.
    /// Absent or unreadable content degrades to the empty sequence.
    pub fn load(&mut self) -> SqliteResult<()> {
        self.scenes = match self.state.get(SCHEDULE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored schedule is unreadable, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(())
    }

    /// Append a new scene built from the draft, assign a fresh id, persist.
    /// Returns the stored scene.
    pub fn add(&mut self, draft: SceneDraft) -> SqliteResult<Scene> {
        let scene = Scene::from_draft(draft);
        self.scenes.push(scene.clone());
        self.persist()?;
        Ok(scene)
    }

    /// Remove the scene with the given id, persist. Unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> SqliteResult<()> {
        let before = self.scenes.len();
        self.scenes.retain(|scene| scene.id != id);
        if self.scenes.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Replace the whole sequence (project import), persist.
    pub fn replace(&mut self, scenes: Vec<Scene>) -> SqliteResult<()> {
        self.scenes = scenes;
        self.persist()
    }

    /// Serialize the entire sequence to storage, overwriting the old value.
    pub fn persist(&self) -> SqliteResult<()> {
        let raw = serde_json::to_string(&self.scenes).expect("scenes serialize to JSON");
        self.state.set(SCHEDULE_KEY, &raw)
    }

    /// Scenes in insertion order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Look up a scene by id
    pub fn get(&self, id: Uuid) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
