// Appointment Calendar
// Loads the configured store and logs today's agenda

use anyhow::Result;

use appointment_calendar::services::appointments::AppointmentStore;
use appointment_calendar::services::date_manager::DateManager;
use appointment_calendar::services::day_view::DayViewService;
use appointment_calendar::services::settings::SettingsService;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Appointment Calendar");

    let settings_service = SettingsService::from_project_dirs();
    let settings = settings_service.get()?;
    log::info!(
        "Using {:?} storage in {}",
        settings.storage_backend,
        SettingsService::data_dir(&settings).display()
    );

    let storage = SettingsService::open_storage(&settings)?;
    let mut store = AppointmentStore::load_with_settings(storage, &settings)?;
    let dates = DateManager::default();

    let day_view = DayViewService::new(&mut store, &dates);
    let rows = day_view.day_appointments();
    let count: usize = rows.iter().map(|row| row.data.len()).sum();
    log::info!("{} appointments on {}", count, dates.current_date());

    for row in rows.iter().filter(|row| !row.data.is_empty()) {
        for appointment in &row.data {
            log::info!(
                "{:>5}  {} ({} min)",
                row.plain_time,
                appointment.title,
                appointment.duration().num_minutes()
            );
        }
    }

    Ok(())
}
