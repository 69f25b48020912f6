pub mod archiver;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod history;
pub mod logging;
pub mod models;
pub mod parser;
pub mod tracker;
