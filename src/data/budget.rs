//! Production budget store
//!
//! Shares the schedule store's shape: the in-memory sequence owns the
//! data, storage mirrors it wholesale. The running total is always
//! recomputed from the current items, never tracked incrementally.

use rusqlite::Result as SqliteResult;
use uuid::Uuid;

use super::models::{BudgetItem, Currency};
use super::state::{StateStore, BUDGET_KEY, CURRENCY_KEY};

pub struct BudgetStore {
    state: StateStore,
    items: Vec<BudgetItem>,
}

impl BudgetStore {
    pub fn new(state: StateStore) -> Self {
        Self {
            state,
            items: Vec::new(),
        }
    }

    /// Read the persisted sequence, replacing the in-memory one.
    /// Absent or unreadable content degrades to the empty sequence.
    pub fn load(&mut self) -> SqliteResult<()> {
        self.items = match self.state.get(BUDGET_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored budget is unreadable, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(())
    }

    /// Append a new item, persist. The cost arrives already validated;
    /// non-numeric input never reaches the store.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        category: impl Into<String>,
        cost: f64,
    ) -> SqliteResult<BudgetItem> {
        let item = BudgetItem::new(description, category, cost);
        self.items.push(item.clone());
        self.persist()?;
        Ok(item)
    }

    /// Remove the item with the given id, persist. Unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> SqliteResult<()> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Replace the whole sequence (project import), persist.
    pub fn replace(&mut self, items: Vec<BudgetItem>) -> SqliteResult<()> {
        self.items = items;
        self.persist()
    }

    /// Serialize the entire sequence to storage, overwriting the old value.
    pub fn persist(&self) -> SqliteResult<()> {
        let raw = serde_json::to_string(&self.items).expect("items serialize to JSON");
        self.state.set(BUDGET_KEY, &raw)
    }

    /// Items in insertion order
    pub fn items(&self) -> &[BudgetItem] {
        &self.items
    }

    /// Sum of all current item costs
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.cost).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read the persisted currency preference, defaulting when absent
    /// or unrecognized.
    pub fn currency(&self) -> SqliteResult<Currency> {
        self.currency_or(Currency::default())
    }

    /// Read the persisted currency preference with an explicit fallback
    /// (the configured default on first launch).
    pub fn currency_or(&self, fallback: Currency) -> SqliteResult<Currency> {
        Ok(self
            .state
            .get(CURRENCY_KEY)?
            .and_then(|code| Currency::from_code(&code))
            .unwrap_or(fallback))
    }

    /// Persist the currency preference. Stored amounts are untouched;
    /// only formatting changes.
    pub fn set_currency(&self, currency: Currency) -> SqliteResult<()> {
        self.state.set(CURRENCY_KEY, currency.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Database;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Database, BudgetStore) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        let store = BudgetStore::new(StateStore::new(db.connection()));
        (dir, db, store)
    }

    #[test]
    fn total_tracks_adds_and_removes() {
        let (_dir, _db, mut store) = setup();
        let lens = store.add("Lens kit", "Camera", 100.0).unwrap();
        store.add("Permit", "Locations", 50.5).unwrap();
        assert_eq!(store.total(), 150.5);

        store.remove(lens.id).unwrap();
        assert_eq!(store.total(), 50.5);

        // Unknown id is a no-op
        store.remove(lens.id).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn persist_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();

        let mut store = BudgetStore::new(StateStore::new(db.connection()));
        let added = store.add("Crane rental", "Grip", 1200.0).unwrap();

        let mut reloaded = BudgetStore::new(StateStore::new(db.connection()));
        reloaded.load().unwrap();
        assert_eq!(reloaded.items(), &[added]);
        assert_eq!(reloaded.total(), 1200.0);
    }

    #[test]
    fn load_degrades_unreadable_content_to_empty() {
        let (_dir, db, mut store) = setup();
        let state = StateStore::new(db.connection());
        state.set(BUDGET_KEY, "{broken").unwrap();

        store.load().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.total(), 0.0);
    }

    #[test]
    fn currency_preference_roundtrips() {
        let (_dir, _db, store) = setup();
        assert_eq!(store.currency().unwrap(), Currency::Usd);

        store.set_currency(Currency::Inr).unwrap();
        assert_eq!(store.currency().unwrap(), Currency::Inr);
    }

    #[test]
    fn switching_currency_keeps_stored_amounts() {
        let (_dir, _db, mut store) = setup();
        store.add("Catering", "Production", 150.5).unwrap();

        store.set_currency(Currency::Eur).unwrap();
        assert_eq!(store.total(), 150.5);
        assert_eq!(
            store.currency().unwrap().format(store.total()),
            "€150.50"
        );
    }
}
