pub mod add_reference;
pub mod fetch_reports;
pub mod submit_report;
