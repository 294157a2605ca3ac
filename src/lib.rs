//! Alerta Price Alert Service
//!
//! Records "notify me when the price drops" requests from shoppers: a small
//! HTTP form backed by a SQLite store.

pub mod application;
pub mod config;
pub mod domain;
pub mod persistence;

use crate::application::recorder::AlertRecorder;
use crate::persistence::DbPool;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub recorder: AlertRecorder,
    pub pool: DbPool,
}
