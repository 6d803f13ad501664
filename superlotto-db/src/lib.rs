pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod refresh;
pub mod source;
pub mod store;
