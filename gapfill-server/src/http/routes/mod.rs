//! Route handlers organized by resource

pub mod download;
pub mod health;
pub mod models;
pub mod pages;
