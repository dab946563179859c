pub mod analyze;
pub mod chat;
pub mod service_info;
