//! Background services

pub mod reminders;

pub use reminders::{NoopReminderProcessor, ReminderJob, ReminderProcessor};
