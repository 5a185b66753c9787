pub mod admission_window;
pub mod attendance;
pub mod event;
pub mod event_status;
pub mod provenance;
