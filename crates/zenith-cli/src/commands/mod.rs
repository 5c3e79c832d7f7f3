pub mod catalog;
pub mod completions;
pub mod config;
pub mod view;
