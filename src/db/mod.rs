pub mod connection;
pub mod inspections;
