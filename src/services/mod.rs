// Service module exports

pub mod appointments;
pub mod database;
pub mod date_manager;
pub mod day_view;
pub mod editor;
pub mod reschedule;
pub mod settings;
pub mod storage;
pub mod time_grid;
