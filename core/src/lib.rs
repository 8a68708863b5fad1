//! Client core for the todo list screen.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and models the todo list
//! screen as an explicit state container driven by discrete events.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url`.
//! - Each REST operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoListView` turns user events into `Command`s. The host executes
//!   the requests and feeds the responses back as `Msg::Response`. The
//!   displayed list is only ever replaced by a successful fetch.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, UpdateTodo};
pub use view::{
    Command, EditTarget, Msg, Notification, NotificationLevel, Op, PendingRequest, TodoListView,
    Transition, ViewState,
};
