//! Project file save/load
//!
//! A project file bundles both sequences plus metadata into a single
//! human-readable JSON document with a `.filmproj` extension. Import is
//! all-or-nothing: a file that fails to read or parse changes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{BudgetItem, BudgetStore, Scene, ScheduleStore};

/// File extension for project bundles
pub const PROJECT_FILE_EXTENSION: &str = "filmproj";

/// Format version stamped into exported bundles. Informational: import
/// accepts any tag, the format is forward-compatible JSON.
pub const PROJECT_FORMAT_VERSION: &str = "1.0";

/// The combined export/import unit containing both stores' full contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBundle {
    pub project_name: String,
    pub save_date: DateTime<Utc>,
    pub version: String,
    #[serde(default)]
    pub schedule_data: Vec<Scene>,
    #[serde(default)]
    pub budget_data: Vec<BudgetItem>,
}

impl ProjectBundle {
    /// Assemble a bundle from the current store contents
    pub fn assemble(project_name: &str, schedule: &ScheduleStore, budget: &BudgetStore) -> Self {
        Self {
            project_name: project_name.to_string(),
            save_date: Utc::now(),
            version: PROJECT_FORMAT_VERSION.to_string(),
            schedule_data: schedule.scenes().to_vec(),
            budget_data: budget.items().to_vec(),
        }
    }

    /// Parse a bundle from file contents
    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        serde_json::from_str(contents).context("not a valid project file")
    }
}

/// Default export file name for a project ("My Film Project.filmproj")
pub fn default_export_path(project_name: &str) -> PathBuf {
    let stem: String = project_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect();
    PathBuf::from(format!("{}.{}", stem.trim(), PROJECT_FILE_EXTENSION))
}

/// Flush both stores to storage, then write the bundle to `path`.
pub fn export_project(
    path: &Path,
    project_name: &str,
    schedule: &ScheduleStore,
    budget: &BudgetStore,
) -> anyhow::Result<()> {
    // Make sure storage matches the in-memory state before bundling
    schedule.persist()?;
    budget.persist()?;

    let bundle = ProjectBundle::assemble(project_name, schedule, budget);
    let json = serde_json::to_string_pretty(&bundle)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        scenes = bundle.schedule_data.len(),
        items = bundle.budget_data.len(),
        "Exported project"
    );
    Ok(())
}

/// Read a bundle from `path` and overwrite both stores with its contents.
/// Missing sequences default to empty. Any read or parse failure leaves
/// both stores untouched.
pub fn import_project(
    path: &Path,
    schedule: &mut ScheduleStore,
    budget: &mut BudgetStore,
) -> anyhow::Result<ProjectBundle> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let bundle = ProjectBundle::from_json(&contents)?;

    schedule.replace(bundle.schedule_data.clone())?;
    budget.replace(bundle.budget_data.clone())?;

    tracing::info!(
        path = %path.display(),
        scenes = bundle.schedule_data.len(),
        items = bundle.budget_data.len(),
        "Imported project"
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Database, SceneDraft, StateStore};
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, ScheduleStore, BudgetStore) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        let schedule = ScheduleStore::new(StateStore::new(db.connection()));
        let budget = BudgetStore::new(StateStore::new(db.connection()));
        (dir, schedule, budget)
    }

    #[test]
    fn export_then_import_reproduces_both_sequences() {
        let (dir, mut schedule, mut budget) = setup();

        let scene = schedule
            .add(SceneDraft {
                number: "1".to_string(),
                heading: "INT. OFFICE".to_string(),
                status: "Confirmed".to_string(),
                ..SceneDraft::default()
            })
            .unwrap();
        let item = budget.add("Permit", "Locations", 50.5).unwrap();

        let path = dir.path().join("project.filmproj");
        export_project(&path, "Test Project", &schedule, &budget).unwrap();

        // Import into a fresh pair of stores backed by a fresh database
        let (_dir2, mut schedule2, mut budget2) = setup();
        let bundle = import_project(&path, &mut schedule2, &mut budget2).unwrap();

        assert_eq!(bundle.project_name, "Test Project");
        assert_eq!(bundle.version, PROJECT_FORMAT_VERSION);
        assert_eq!(schedule2.scenes(), &[scene]);
        assert_eq!(budget2.items(), &[item]);
    }

    #[test]
    fn import_failure_leaves_stores_untouched() {
        let (dir, mut schedule, mut budget) = setup();
        schedule
            .add(SceneDraft {
                number: "1".to_string(),
                ..SceneDraft::default()
            })
            .unwrap();
        budget.add("Tape", "Grip", 12.0).unwrap();

        let path = dir.path().join("broken.filmproj");
        fs::write(&path, "{ not json").unwrap();

        assert!(import_project(&path, &mut schedule, &mut budget).is_err());
        assert_eq!(schedule.len(), 1);
        assert_eq!(budget.len(), 1);

        // Missing file behaves the same way
        let missing = dir.path().join("nope.filmproj");
        assert!(import_project(&missing, &mut schedule, &mut budget).is_err());
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn missing_sequences_default_to_empty() {
        let bundle = ProjectBundle::from_json(
            r#"{"projectName":"Bare","saveDate":"2026-01-05T10:00:00Z","version":"0.9"}"#,
        )
        .unwrap();
        assert!(bundle.schedule_data.is_empty());
        assert!(bundle.budget_data.is_empty());
        // The version tag is informational, not validated
        assert_eq!(bundle.version, "0.9");
    }

    #[test]
    fn default_export_path_sanitizes_separators() {
        assert_eq!(
            default_export_path("My Film Project"),
            PathBuf::from("My Film Project.filmproj")
        );
        assert_eq!(
            default_export_path("cut/print: take 2"),
            PathBuf::from("cut-print- take 2.filmproj")
        );
    }
}
