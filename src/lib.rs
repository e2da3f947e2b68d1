pub mod app;
pub mod catalog;
pub mod models;
pub mod state;
pub mod text;
pub mod views;
