//! End-to-end flows across the stores and the project bundler

use stripboard::project::{export_project, import_project};
use stripboard::{BudgetStore, Currency, Database, SceneDraft, ScheduleStore, StateStore};
use tempfile::TempDir;

fn open_stores(dir: &TempDir) -> (Database, ScheduleStore, BudgetStore) {
    let db = Database::open(dir.path().join("stripboard.db")).unwrap();
    let mut schedule = ScheduleStore::new(StateStore::new(db.connection()));
    let mut budget = BudgetStore::new(StateStore::new(db.connection()));
    schedule.load().unwrap();
    budget.load().unwrap();
    (db, schedule, budget)
}

fn scene(number: &str, heading: &str, status: &str) -> SceneDraft {
    SceneDraft {
        number: number.to_string(),
        heading: heading.to_string(),
        status: status.to_string(),
        ..SceneDraft::default()
    }
}

#[test]
fn schedule_survives_a_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let (_db, mut schedule, _budget) = open_stores(&dir);
        schedule.add(scene("1", "INT. OFFICE", "Confirmed")).unwrap();
        schedule.add(scene("2", "EXT. STREET", "Pending")).unwrap();
    }

    // A fresh process sees the same data
    let (_db, schedule, _budget) = open_stores(&dir);
    assert_eq!(schedule.len(), 2);
    assert_eq!(schedule.scenes()[0].number, "1");
    assert_eq!(schedule.scenes()[1].heading, "EXT. STREET");
}

#[test]
fn add_then_confirmed_delete_empties_schedule_and_storage() {
    let dir = TempDir::new().unwrap();
    let (db, mut schedule, _budget) = open_stores(&dir);

    let added = schedule.add(scene("1", "INT. OFFICE", "Confirmed")).unwrap();
    assert_eq!(schedule.len(), 1);
    assert!(matches!(
        added.status_style(),
        Some(stripboard::StatusStyle::Confirmed)
    ));

    schedule.remove(added.id).unwrap();
    assert!(schedule.is_empty());

    // Storage holds the empty sequence, not nothing
    let state = StateStore::new(db.connection());
    assert_eq!(
        state.get(stripboard::data::SCHEDULE_KEY).unwrap(),
        Some("[]".to_string())
    );
}

#[test]
fn budget_total_tracks_any_interleaving() {
    let dir = TempDir::new().unwrap();
    let (_db, _schedule, mut budget) = open_stores(&dir);

    let a = budget.add("Lens kit", "Camera", 100.0).unwrap();
    budget.add("Permit", "Locations", 50.5).unwrap();
    assert_eq!(budget.total(), 150.5);
    assert_eq!(Currency::Usd.format(budget.total()), "$150.50");

    budget.remove(a.id).unwrap();
    let b = budget.add("Gels", "Lighting", 24.25).unwrap();
    assert_eq!(budget.total(), 74.75);

    budget.remove(b.id).unwrap();
    assert_eq!(budget.total(), 50.5);
}

#[test]
fn currency_switch_reformats_without_touching_amounts() {
    let dir = TempDir::new().unwrap();
    let (_db, _schedule, mut budget) = open_stores(&dir);

    budget.add("Catering", "Production", 150.5).unwrap();
    budget.set_currency(Currency::Eur).unwrap();

    // Stored numbers are unchanged, only the presentation differs
    assert_eq!(budget.total(), 150.5);
    assert_eq!(budget.currency().unwrap().format(budget.total()), "€150.50");

    // And the preference itself persists across a reopen
    let (_db2, _schedule2, budget2) = open_stores(&dir);
    assert_eq!(budget2.currency().unwrap(), Currency::Eur);
}

#[test]
fn export_import_roundtrip_reproduces_both_stores() {
    let dir = TempDir::new().unwrap();
    let (_db, mut schedule, mut budget) = open_stores(&dir);

    let mut draft = scene("12A", "INT. WAREHOUSE - NIGHT", "Standby");
    draft.cast = "J. Doe, A. Smith".to_string();
    draft.equipment = "Steadicam".to_string();
    schedule.add(draft).unwrap();
    schedule.add(scene("13", "EXT. PIER - NIGHT", "Pending")).unwrap();
    budget.add("Crane rental", "Grip", 1200.0).unwrap();
    budget.add("Night permit", "Locations", 350.75).unwrap();

    let file = dir.path().join("Night Shoot.filmproj");
    export_project(&file, "Night Shoot", &schedule, &budget).unwrap();

    // Import into a completely separate data directory
    let other = TempDir::new().unwrap();
    let (_db2, mut schedule2, mut budget2) = open_stores(&other);
    let bundle = import_project(&file, &mut schedule2, &mut budget2).unwrap();

    assert_eq!(bundle.project_name, "Night Shoot");
    assert_eq!(schedule2.scenes(), schedule.scenes());
    assert_eq!(budget2.items(), budget.items());
    assert_eq!(budget2.total(), budget.total());
}

#[test]
fn import_overwrites_previous_contents() {
    let dir = TempDir::new().unwrap();
    let (_db, mut schedule, mut budget) = open_stores(&dir);
    schedule.add(scene("99", "INT. OLD SET", "Canceled")).unwrap();
    budget.add("Old cost", "Misc", 5.0).unwrap();

    // A bundle with only schedule data: the budget must become empty
    let file = dir.path().join("incoming.filmproj");
    std::fs::write(
        &file,
        r#"{
  "projectName": "Incoming",
  "saveDate": "2026-02-01T09:30:00Z",
  "version": "1.0",
  "scheduleData": [
    {
      "id": "7b3e7a30-4f07-4cf5-9cd1-6a36a9d24a61",
      "number": "1", "heading": "INT. LAB - DAY", "date": "", "time": "",
      "type": "INT", "location": "Lab", "pages": "", "duration": "",
      "status": "Confirmed", "cast": "", "equipment": ""
    }
  ]
}"#,
    )
    .unwrap();

    import_project(&file, &mut schedule, &mut budget).unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule.scenes()[0].heading, "INT. LAB - DAY");
    assert!(budget.is_empty());
    assert_eq!(budget.total(), 0.0);
}

#[test]
fn unreadable_project_file_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let (_db, mut schedule, mut budget) = open_stores(&dir);
    schedule.add(scene("1", "INT. OFFICE", "Confirmed")).unwrap();
    budget.add("Tape", "Grip", 12.0).unwrap();

    let file = dir.path().join("corrupt.filmproj");
    std::fs::write(&file, "this is not a project file").unwrap();

    assert!(import_project(&file, &mut schedule, &mut budget).is_err());
    assert_eq!(schedule.len(), 1);
    assert_eq!(budget.len(), 1);
    assert_eq!(budget.total(), 12.0);
}
