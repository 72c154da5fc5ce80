pub mod auth;
pub mod export;
pub mod orders;
pub mod records;
pub mod users;
pub mod workers;
