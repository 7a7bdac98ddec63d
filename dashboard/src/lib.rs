pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod render;
pub mod shell;
pub mod widget;
