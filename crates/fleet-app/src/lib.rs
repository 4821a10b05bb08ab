//! Application service layer - config and the interactive analysis session

pub mod app;
pub mod config;
