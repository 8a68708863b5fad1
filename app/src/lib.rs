//! Terminal host for the todo list screen.
//!
//! # Overview
//! `todo-core` decides what to send and what to show; this crate does the
//! rest. It reads typed lines as user input, executes the view's requests
//! over HTTP, and redraws the screen after every event.
//!
//! # Design
//! - One cooperative event loop on a current-thread runtime owns the view.
//!   Only that loop ever touches the state.
//! - Requests run on tokio's blocking pool with ureq and report back through
//!   an `mpsc` channel, so the screen stays responsive while they are in
//!   flight.
//! - Configuration comes from the environment.

pub mod config;
pub mod input;
pub mod runner;
pub mod screen;
pub mod transport;

pub use config::Config;
pub use runner::Runner;
pub use transport::UreqTransport;
