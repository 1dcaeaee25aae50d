// Résumé files: grouped listing for staff and uploads to object storage.

pub mod handlers;
pub mod listing;
pub mod upload;
