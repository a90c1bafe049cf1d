// Terminal dashboard and CLI client for the SecureSimLab simulation service

pub mod app;
pub mod cli;
pub mod core;
pub mod screens;
pub mod utils;
pub mod widgets;
