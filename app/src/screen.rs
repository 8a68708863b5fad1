//! Plain-text rendering of the view state.

use std::fmt::Write;

use crossterm::style::Stylize;
use todo_core::{Notification, NotificationLevel, ViewState};

pub const TITLE: &str = "Todo App";
pub const PLACEHOLDER: &str = "Add a new todo";

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    if state.input().is_empty() {
        let _ = writeln!(out, "> ({PLACEHOLDER})");
    } else {
        let _ = writeln!(out, "> {}", state.input());
    }
    if state.is_loading() {
        let _ = writeln!(out, "loading...");
    }

    for (i, todo) in state.todos().iter().enumerate() {
        let check = if todo.completed { "[x]" } else { "[ ]" };
        match state.editing() {
            Some(target) if target.id == todo.id => {
                let _ = writeln!(out, "{:>3}. {check} edit: {}_", i + 1, target.text);
            }
            _ if todo.completed => {
                let text = todo.text.as_str().crossed_out().dim();
                let _ = writeln!(out, "{:>3}. {check} {text}", i + 1);
            }
            _ => {
                let _ = writeln!(out, "{:>3}. {check} {}", i + 1, todo.text);
            }
        }
    }
    out
}

pub fn render_notification(notification: &Notification) -> String {
    match notification.level {
        NotificationLevel::Success => format!("[ok] {}", notification.message),
        NotificationLevel::Failure => format!("[error] {}", notification.message),
    }
}
