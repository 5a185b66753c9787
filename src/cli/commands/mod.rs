pub mod add;
pub mod attendees;
pub mod cancel;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod policy;
pub mod tick;
pub mod timein;
pub mod timeout;
