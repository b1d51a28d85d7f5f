//! Linkplay Notifier - forwards Linkplay server log events to Discord.

pub mod catalog;
pub mod config;
pub mod display;
pub mod parser;
pub mod render;
pub mod sink;
pub mod watcher;
