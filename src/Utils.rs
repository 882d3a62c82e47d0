//! different utility modules used throughout the project
/// tiny module to init logging and save iteration histories into files
pub mod logger;
/// pretty-printed tables of solver histories for logs and the demo binary
pub mod reports;
