pub mod account;
pub mod company;
pub mod notification;
pub mod resume;
