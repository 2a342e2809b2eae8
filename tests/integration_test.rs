// Integration tests for the appointment store, persistence and day view

mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use appointment_calendar::models::appointment::TimeStamps;
use appointment_calendar::models::settings::{Settings, StorageBackend};
use appointment_calendar::services::appointments::AppointmentStore;
use appointment_calendar::services::date_manager::DateManager;
use appointment_calendar::services::day_view::DayViewService;
use appointment_calendar::services::editor::AppointmentForm;
use appointment_calendar::services::settings::SettingsService;
use appointment_calendar::services::storage::{JsonFileStore, MemoryStore, SqliteStore};
use appointment_calendar::services::time_grid::format_to_time_string;
use chrono::Timelike;
use fixtures::{appointments, dates};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn labels(store: &AppointmentStore, id: &str) -> (String, String) {
    let appointment = store.find(id).unwrap();
    (
        format_to_time_string(&appointment.start),
        format_to_time_string(&appointment.end),
    )
}

#[test]
fn test_create_drop_and_move_across_days() {
    init_logging();
    let mut store = AppointmentStore::default();

    let stamps = TimeStamps::new("9:00am", "10:00am");
    let appointment = store.make_default(dates::may_1_2024(), Some(&stamps)).unwrap();
    let id = appointment.id.clone();

    store.move_to_time_slot(appointment, "11:00am").unwrap();
    assert_eq!(
        labels(&store, &id),
        ("11:00am".to_string(), "12:00pm".to_string())
    );

    let current = store.find(&id).unwrap();
    store.move_to_date(current, dates::may_2_2024()).unwrap();

    assert!(store.appointments_on(dates::may_1_2024()).is_empty());
    assert_eq!(store.appointments_on(dates::may_2_2024()).len(), 1);
    assert_eq!(
        labels(&store, &id),
        ("11:00am".to_string(), "12:00pm".to_string())
    );
}

#[test]
fn test_json_file_store_survives_reload() {
    init_logging();
    let temp = TempDir::new().unwrap();

    {
        let mut store = AppointmentStore::load(Box::new(JsonFileStore::new(temp.path()))).unwrap();
        store.save(appointments::morning_checkup()).unwrap();
        store.save(appointments::afternoon_call()).unwrap();
    }

    assert!(temp.path().join("appointments.json").exists());

    let reloaded = AppointmentStore::load(Box::new(JsonFileStore::new(temp.path()))).unwrap();
    let on_day = reloaded.appointments_on(dates::may_1_2024());
    let ids: Vec<&str> = on_day.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["checkup", "call"]);
    assert_eq!(on_day[1].start.minute(), 45);
}

#[test]
fn test_sqlite_store_survives_reload() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("appointments.db");
    let path = path.to_str().unwrap();

    {
        let storage = SqliteStore::open(path).unwrap();
        let mut store = AppointmentStore::load(Box::new(storage)).unwrap();
        store.save(appointments::morning_checkup()).unwrap();
        store.save(appointments::afternoon_call()).unwrap();
        store.delete("checkup").unwrap();
    }

    let reloaded = AppointmentStore::load(Box::new(SqliteStore::open(path).unwrap())).unwrap();
    assert_eq!(reloaded.find("checkup"), None);
    assert_eq!(reloaded.find("call").unwrap().title, "Appointment call");
}

#[test]
fn test_settings_drive_storage_and_date_keys() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let service = SettingsService::new(temp.path().join("settings.toml"));
    service
        .update(&Settings {
            storage_backend: StorageBackend::Json,
            data_dir: Some(temp.path().join("data")),
            storage_key: "calendar".to_string(),
            date_key_format: "%Y-%m-%d".to_string(),
            default_start: "8:00am".to_string(),
            default_end: "8:30am".to_string(),
        })
        .unwrap();

    let settings = service.get().unwrap();
    let storage = SettingsService::open_storage(&settings).unwrap();
    let mut store = AppointmentStore::load_with_settings(storage, &settings).unwrap();

    let appointment = store.make_default(dates::leap_day_2024(), None).unwrap();
    assert_eq!((appointment.end.hour(), appointment.end.minute()), (8, 30));
    store.save(appointment).unwrap();

    assert!(store.get_all().contains_key("2024-02-29"));
    assert!(temp.path().join("data").join("calendar.json").exists());
}

#[test]
fn test_listener_sees_every_change_in_order() {
    init_logging();
    let mut store = AppointmentStore::load(Box::new(MemoryStore::new())).unwrap();

    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);
    store.subscribe(move |all| sink.borrow_mut().push(all.values().map(Vec::len).sum::<usize>()));

    store.save(appointments::morning_checkup()).unwrap();
    store.save(appointments::afternoon_call()).unwrap();
    store.save(appointments::afternoon_call()).unwrap();
    store.delete("checkup").unwrap();

    assert_eq!(*counts.borrow(), vec![0, 1, 2, 2, 1]);
}

#[test]
fn test_day_view_buckets_by_hour() {
    init_logging();
    let mut store = AppointmentStore::default();
    store.save(appointments::morning_checkup()).unwrap();
    store.save(appointments::afternoon_call()).unwrap();
    let dates = DateManager::new(dates::may_1_2024());

    let day_view = DayViewService::new(&mut store, &dates);
    let occupied: Vec<(String, usize)> = day_view
        .day_appointments()
        .into_iter()
        .filter(|row| !row.data.is_empty())
        .map(|row| (row.start_time, row.data.len()))
        .collect();

    assert_eq!(
        occupied,
        vec![("9:00am".to_string(), 1), ("2:00pm".to_string(), 1)]
    );
}

#[test]
fn test_editor_round_trip() {
    init_logging();
    let mut store = AppointmentStore::default();
    let dates = DateManager::new(dates::may_1_2024());

    let draft = DayViewService::new(&mut store, &dates)
        .create_new_appointment("3:00pm")
        .unwrap();
    let mut form = AppointmentForm::from_appointment(&draft);
    assert_eq!(form.end, "4:00pm");

    form.title = "Review".to_string();
    form.description = "Quarterly numbers".to_string();
    form.clone().submit(&mut store).unwrap();
    assert_eq!(store.find(&draft.id).unwrap().title, "Review");

    form.remove(&mut store).unwrap();
    assert!(store.get_all().is_empty());
}
