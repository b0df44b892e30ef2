//! Movie ratings service with user-based collaborative filtering
//!
//! The [`prediction`] module holds the predictor itself; everything else is the
//! JSON API, in-memory storage and configuration around it.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod prediction;
pub mod services;
