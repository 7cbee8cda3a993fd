pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod events;
pub mod infrastructure;
pub mod services;
