pub mod config;
pub mod error;
pub mod login;
pub mod proxy;
pub mod resource;
