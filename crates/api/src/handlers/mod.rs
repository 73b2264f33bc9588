pub mod auth;
pub mod dashboard;
pub mod homepage;
pub mod leads;
pub mod projects;
pub mod settings;
pub mod testimonials;
pub mod uploads;
