//! The todo list screen as an explicit state container.
//!
//! # Design
//! `TodoListView` owns a `ViewState` and reacts to `Msg` events. It never
//! performs I/O: every network round-trip leaves as a `Command::Send` and
//! comes back as `Msg::Response` carrying the same `Op`. State changes only
//! through `Transition`s applied by `ViewState::apply`.
//!
//! Mutations are fire-and-refresh. A successful create, update or delete
//! triggers a full list fetch, and the list shown is always the body of the
//! last fetch that succeeded. Nothing is merged or guessed locally.
//!
//! Overlapping requests are not coordinated. Whichever fetch resolves last
//! wins the list.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

const LOAD_FAILED: &str = "Error loading todos";
const CREATE_FAILED: &str = "Error creating todo";
const UPDATE_FAILED: &str = "Error updating todo";
const DELETE_FAILED: &str = "Error deleting todo";
const CREATED: &str = "Todo added successfully";
const UPDATED: &str = "Todo updated successfully";
const DELETED: &str = "Todo deleted successfully";

/// The todo currently shown as an editable field, with its edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub id: String,
    pub text: String,
}

/// Everything the screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    todos: Vec<Todo>,
    input: String,
    editing: Option<EditTarget>,
    loading: bool,
}

impl ViewState {
    /// Todos in the order of the last successful fetch.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The new-todo input field.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn editing(&self) -> Option<&EditTarget> {
        self.editing.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn apply(&mut self, transition: Transition) {
        debug!(?transition, "view transition");
        match transition {
            Transition::SetList(todos) => self.todos = todos,
            Transition::SetInput(text) => self.input = text,
            Transition::SetEditing(target) => self.editing = target,
            Transition::SetEditText(text) => {
                if let Some(target) = self.editing.as_mut() {
                    target.text = text;
                }
            }
            Transition::SetLoading(loading) => self.loading = loading,
        }
    }
}

/// The only ways `ViewState` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Replace the whole list with a fetched snapshot.
    SetList(Vec<Todo>),
    SetInput(String),
    /// Enter edit mode for a todo, or leave it with `None`.
    SetEditing(Option<EditTarget>),
    /// Replace the edit buffer. Ignored outside edit mode.
    SetEditText(String),
    SetLoading(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// A short toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.to_string(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            level: NotificationLevel::Failure,
            message: message.to_string(),
        }
    }
}

/// What a request was sent for. Echoed back in `Msg::Response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Full list fetch. `then` is shown once the fetch resolves, whatever
    /// its outcome.
    Fetch { then: Option<Notification> },
    Create,
    Toggle { id: String },
    SaveEdit { id: String },
    Delete { id: String },
}

impl Op {
    fn failure_message(&self) -> &'static str {
        match self {
            Op::Fetch { .. } => LOAD_FAILED,
            Op::Create => CREATE_FAILED,
            Op::Toggle { .. } | Op::SaveEdit { .. } => UPDATE_FAILED,
            Op::Delete { .. } => DELETE_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub op: Op,
    pub request: HttpRequest,
}

/// Side effects the host must carry out after `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Execute the request and report back with `Msg::Response`.
    Send(PendingRequest),
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// First display, or a manual reload.
    Load,
    SetInput(String),
    /// The Add button.
    Create,
    /// Checkbox tap. `completed` is the flag currently shown.
    Toggle { id: String, completed: bool },
    StartEdit { id: String },
    SetEditText(String),
    /// The edit field lost focus.
    SaveEdit,
    Delete { id: String },
    Response {
        op: Op,
        result: Result<HttpResponse, ApiError>,
    },
}

#[derive(Debug, Clone)]
pub struct TodoListView {
    client: TodoClient,
    state: ViewState,
}

impl TodoListView {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Command> {
        match msg {
            Msg::Load => vec![self.fetch(None)],
            Msg::SetInput(text) => {
                self.state.apply(Transition::SetInput(text));
                Vec::new()
            }
            Msg::Create => self.create(),
            Msg::Toggle { id, completed } => {
                let input = UpdateTodo::completed(!completed);
                let request = self.client.build_update_todo(&id, &input);
                vec![send_or_fail(Op::Toggle { id }, request)]
            }
            Msg::StartEdit { id } => {
                match self.state.find(&id) {
                    Some(todo) => {
                        let target = EditTarget {
                            id: todo.id.clone(),
                            text: todo.text.clone(),
                        };
                        self.state.apply(Transition::SetEditing(Some(target)));
                    }
                    None => debug!(%id, "start edit on unknown todo ignored"),
                }
                Vec::new()
            }
            Msg::SetEditText(text) => {
                self.state.apply(Transition::SetEditText(text));
                Vec::new()
            }
            Msg::SaveEdit => self.save_edit(),
            Msg::Delete { id } => {
                let request = self.client.build_delete_todo(&id);
                vec![Command::Send(PendingRequest {
                    op: Op::Delete { id },
                    request,
                })]
            }
            Msg::Response { op, result } => self.on_response(op, result),
        }
    }

    fn create(&mut self) -> Vec<Command> {
        if self.state.input.trim().is_empty() {
            return Vec::new();
        }
        let input = CreateTodo {
            text: self.state.input.clone(),
        };
        let request = self.client.build_create_todo(&input);
        vec![send_or_fail(Op::Create, request)]
    }

    fn save_edit(&mut self) -> Vec<Command> {
        let Some(target) = self.state.editing.as_ref() else {
            return Vec::new();
        };
        if target.text.trim().is_empty() {
            return Vec::new();
        }
        let input = UpdateTodo::text(target.text.clone());
        let request = self.client.build_update_todo(&target.id, &input);
        vec![send_or_fail(
            Op::SaveEdit {
                id: target.id.clone(),
            },
            request,
        )]
    }

    fn fetch(&mut self, then: Option<Notification>) -> Command {
        self.state.apply(Transition::SetLoading(true));
        Command::Send(PendingRequest {
            op: Op::Fetch { then },
            request: self.client.build_list_todos(),
        })
    }

    fn on_response(&mut self, op: Op, result: Result<HttpResponse, ApiError>) -> Vec<Command> {
        let client = &self.client;
        match op {
            Op::Fetch { then } => {
                self.state.apply(Transition::SetLoading(false));
                let mut commands = Vec::new();
                match result.and_then(|r| client.parse_list_todos(r)) {
                    Ok(todos) => self.state.apply(Transition::SetList(todos)),
                    Err(err) => {
                        warn!(error = %err, "fetching todos failed");
                        commands.push(Command::Notify(Notification::failure(LOAD_FAILED)));
                    }
                }
                commands.extend(then.map(Command::Notify));
                commands
            }
            Op::Create => match result.and_then(|r| client.parse_create_todo(r)) {
                Ok(()) => {
                    self.state.apply(Transition::SetInput(String::new()));
                    vec![self.fetch(Some(Notification::success(CREATED)))]
                }
                Err(err) => fail(&Op::Create, err),
            },
            Op::Toggle { id } => match result.and_then(|r| client.parse_update_todo(r)) {
                Ok(()) => vec![self.fetch(None)],
                Err(err) => fail(&Op::Toggle { id }, err),
            },
            Op::SaveEdit { id } => match result.and_then(|r| client.parse_update_todo(r)) {
                Ok(()) => {
                    // A different row may have entered edit mode meanwhile.
                    if self.state.editing.as_ref().is_some_and(|t| t.id == id) {
                        self.state.apply(Transition::SetEditing(None));
                    }
                    vec![self.fetch(Some(Notification::success(UPDATED)))]
                }
                Err(err) => fail(&Op::SaveEdit { id }, err),
            },
            Op::Delete { id } => match result.and_then(|r| client.parse_delete_todo(r)) {
                Ok(()) => vec![self.fetch(Some(Notification::success(DELETED)))],
                Err(err) => fail(&Op::Delete { id }, err),
            },
        }
    }
}

fn send_or_fail(op: Op, request: Result<HttpRequest, ApiError>) -> Command {
    match request {
        Ok(request) => Command::Send(PendingRequest { op, request }),
        Err(err) => {
            warn!(?op, error = %err, "building request failed");
            Command::Notify(Notification::failure(op.failure_message()))
        }
    }
}

fn fail(op: &Op, err: ApiError) -> Vec<Command> {
    warn!(?op, error = %err, "request failed");
    vec![Command::Notify(Notification::failure(op.failure_message()))]
}
