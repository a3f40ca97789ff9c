#[macro_use]
pub mod macros;

pub mod clean_up;
pub mod config;
pub mod connect_duck_db;
pub mod dedupe;
pub mod derive;
pub mod error;
pub mod extract;
pub mod fields;
pub mod flatten;
pub mod http;
pub mod ids;
pub mod jobs;
pub mod models;
