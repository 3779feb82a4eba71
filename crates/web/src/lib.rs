//! Startify web application library.
//!
//! Signup, login, a dashboard and a small per-user product catalog, served
//! as server-rendered HTML. All data lives in process memory.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
