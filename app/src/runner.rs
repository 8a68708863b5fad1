//! The screen's event loop.
//!
//! User lines and request completions are handled one at a time on the
//! calling task. Requests run on the blocking pool and come back through an
//! unbounded channel as `Msg::Response`. Nothing orders overlapping
//! requests: completions are handled in arrival order.

use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use todo_core::{
    ApiError, Command, HttpResponse, Msg, Notification, PendingRequest, Todo, TodoClient,
    TodoListView,
};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::input::{self, UiCommand, HELP};
use crate::screen;
use crate::transport::UreqTransport;

pub struct Runner<W> {
    view: TodoListView,
    transport: UreqTransport,
    out: W,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    in_flight: usize,
    shown: Vec<Notification>,
}

impl<W: Write> Runner<W> {
    pub fn new(config: &Config, out: W) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            view: TodoListView::new(TodoClient::new(&config.api_url)),
            transport: UreqTransport::new(),
            out,
            tx,
            rx,
            in_flight: 0,
            shown: Vec::new(),
        }
    }

    pub fn view(&self) -> &TodoListView {
        &self.view
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Every notification shown so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.shown
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run until the input ends or the user quits, then wait for requests
    /// still in flight.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> anyhow::Result<()> {
        self.dispatch(Msg::Load)?;
        self.redraw()?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                Some(msg) = self.rx.recv() => {
                    self.in_flight -= 1;
                    self.dispatch(msg)?;
                }
            }
            self.redraw()?;
        }

        self.settle().await?;
        info!("screen closed");
        Ok(())
    }

    /// Apply one typed line. Returns `false` when the user asked to quit.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let command = match input::parse(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(true);
            }
        };
        debug!(?command, "user input");

        match command {
            UiCommand::Quit => return Ok(false),
            UiCommand::Help => writeln!(self.out, "{HELP}")?,
            UiCommand::Input(text) => self.dispatch(Msg::SetInput(text))?,
            UiCommand::Add(text) => {
                if let Some(text) = text {
                    self.dispatch(Msg::SetInput(text))?;
                }
                self.dispatch(Msg::Create)?;
            }
            UiCommand::Toggle(row) => {
                if let Some(todo) = self.row(row)? {
                    let msg = Msg::Toggle {
                        id: todo.id,
                        completed: todo.completed,
                    };
                    self.dispatch(msg)?;
                }
            }
            UiCommand::Edit(row) => {
                if let Some(todo) = self.row(row)? {
                    let msg = Msg::StartEdit { id: todo.id };
                    self.dispatch(msg)?;
                }
            }
            UiCommand::EditText(text) => self.dispatch(Msg::SetEditText(text))?,
            UiCommand::Save => self.dispatch(Msg::SaveEdit)?,
            UiCommand::Delete(row) => {
                if let Some(todo) = self.row(row)? {
                    let msg = Msg::Delete { id: todo.id };
                    self.dispatch(msg)?;
                }
            }
            UiCommand::Reload => self.dispatch(Msg::Load)?,
        }
        Ok(true)
    }

    /// Feed one message to the view and carry out the resulting commands.
    pub fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        for command in self.view.update(msg) {
            match command {
                Command::Send(pending) => {
                    let transport = self.transport.clone();
                    let tx = self.tx.clone();
                    self.in_flight += 1;
                    tokio::task::spawn_blocking(move || {
                        let PendingRequest { op, request } = pending;
                        let result = guarded(|| transport.execute(request));
                        // The receiver only goes away with the runner.
                        let _ = tx.send(Msg::Response { op, result });
                    });
                }
                Command::Notify(notification) => {
                    writeln!(self.out, "{}", screen::render_notification(&notification))?;
                    self.shown.push(notification);
                }
            }
        }
        Ok(())
    }

    /// Process completions until no request is in flight, including the
    /// refreshes that completions trigger.
    pub async fn settle(&mut self) -> io::Result<()> {
        while self.in_flight > 0 {
            let Some(msg) = self.rx.recv().await else { break };
            self.in_flight -= 1;
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        let frame = screen::render(self.view.state());
        write!(self.out, "\n{frame}")?;
        self.out.flush()
    }

    /// Look up a 1-based row on the current screen, reporting a miss.
    fn row(&mut self, row: usize) -> io::Result<Option<Todo>> {
        let todo = self.view.state().todos().get(row - 1).cloned();
        if todo.is_none() {
            writeln!(self.out, "no todo at row {row}")?;
        }
        Ok(todo)
    }
}

/// Run a request, turning a panic into a transport failure so every send
/// still gets its `Msg::Response` and `in_flight` drains.
fn guarded(
    execute: impl FnOnce() -> Result<HttpResponse, ApiError>,
) -> Result<HttpResponse, ApiError> {
    catch_unwind(AssertUnwindSafe(execute)).unwrap_or_else(|_| {
        error!("request execution panicked");
        Err(ApiError::Transport("request execution panicked".to_string()))
    })
}
