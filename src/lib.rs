pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod logging;
pub mod recommend;
pub mod scanner;
pub mod session;
