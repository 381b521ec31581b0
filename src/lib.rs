//! Client for the CineGraph movie recommendation service.
//!
//! Search a movie by name, pick one of the hits (or enter its id), then ask
//! the service for graph-based recommendations. All client state sits in
//! [`controller::InteractionController`].

pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use controller::{InteractionController, Outcome};
pub use error::{AppError, AppResult};
