pub mod dispatch;
pub mod ports;
pub mod presenter;
pub mod repo;
