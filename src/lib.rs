pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod validate;
