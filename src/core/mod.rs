pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod history;
pub mod navigator;
pub mod stream;
