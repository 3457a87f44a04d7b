pub mod args;
pub mod commands;
pub mod dataset;
pub mod detector;
pub mod error;
pub mod output;
pub mod request;
pub mod settings;
pub mod visuals;
pub mod writer;
