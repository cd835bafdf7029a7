pub mod app;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod render;
pub mod store;
