pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod server;
pub mod stats;
pub mod tasks;
pub mod timing;

#[cfg(test)]
pub mod test_utils;
