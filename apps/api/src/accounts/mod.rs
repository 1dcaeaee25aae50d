// Applicant accounts: creation, the applicant table, status edits.

pub mod handlers;
pub mod service;
pub mod view;
