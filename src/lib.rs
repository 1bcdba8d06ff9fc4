// src/lib.rs

pub mod config;
pub mod dataset;
pub mod fetch;
pub mod process;
pub mod scrape;
