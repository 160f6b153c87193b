pub mod api;
pub mod auth;
pub mod claims;
pub mod controller;
pub mod messages;
pub mod models;
pub mod render;
pub mod session;
