pub mod app;
pub mod bundle;
pub mod connection;
pub mod download;
