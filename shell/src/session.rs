//! Interactive session driving a task store
//!
//! Each input line is parsed into a `Command`, validated through the form
//! where needed, and applied to the store. Store "not found" outcomes are
//! reported to the user and nothing else happens.

use anyhow::Result;
use chrono::Utc;
use taskpad_core::task::{InMemoryTaskStore, TaskFilter, TaskRepository};
use tracing::{debug, info};

use crate::command::Command;
use crate::config::ShellConfig;
use crate::form::TaskForm;
use crate::view;

pub const HELP: &str = "\
Commands:
  add <title> [-d <desc>] [-p low|medium|high] [--due YYYY-MM-DD]
  add [options] -- <title starting with ->
  list [all|pending|completed]
  show <id>
  edit <id> [-t <title>] [-d <desc>] [-p <priority>] [--due <date>|none]
  toggle <id>
  rm <id>
  clear
  stats
  json
  help
  quit";

/// Response to one input line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub struct Session {
    store: InMemoryTaskStore,
    config: ShellConfig,
    awaiting_clear_confirmation: bool,
}

impl Session {
    pub fn new(store: InMemoryTaskStore, config: ShellConfig) -> Self {
        Self {
            store,
            config,
            awaiting_clear_confirmation: false,
        }
    }

    pub fn store(&self) -> &InMemoryTaskStore {
        &self.store
    }

    /// Whether the next line is read as a yes/no answer
    pub fn is_confirming(&self) -> bool {
        self.awaiting_clear_confirmation
    }

    pub async fn handle_line(&mut self, line: &str) -> Reply {
        if self.awaiting_clear_confirmation {
            self.awaiting_clear_confirmation = false;
            let answer = line.trim().to_ascii_lowercase();
            return if answer == "y" || answer == "yes" {
                self.run(Command::Clear, true).await
            } else {
                Reply::text("Clear cancelled.")
            };
        }

        let line = line.trim();
        if line.is_empty() {
            return Reply::default();
        }
        if line == "help" || line == "?" {
            return Reply::text(HELP);
        }

        match Command::parse_line(line) {
            Ok(command) => self.run(command, false).await,
            Err(e) => Reply::text(e.to_string()),
        }
    }

    async fn run(&mut self, command: Command, confirmed: bool) -> Reply {
        match self.execute(command, confirmed).await {
            Ok(reply) => reply,
            Err(e) => {
                debug!("Command failed: {:#}", e);
                Reply::text(format!("Error: {}", e))
            }
        }
    }

    async fn execute(&mut self, command: Command, confirmed: bool) -> Result<Reply> {
        let now = Utc::now();

        let reply = match command {
            Command::Add {
                title,
                description,
                priority,
                due,
            } => {
                let request = TaskForm {
                    title: Some(title.join(" ")),
                    description,
                    priority,
                    due_date: due,
                }
                .into_create_request()?;

                let task = self.store.create(request).await?;
                info!("Task {} created", task.id);
                Reply::text(format!("Added task {}: {}", task.id, task.title))
            }
            Command::List { filter } => {
                let filter: TaskFilter = filter.parse()?;
                let tasks = self.store.filter(filter).await?;
                Reply::text(view::render_list(&tasks, filter, now))
            }
            Command::Show { id } => match self.store.get(&id).await? {
                Some(task) => Reply::text(view::render_task(&task, now)),
                None => Reply::text(not_found(&id)),
            },
            Command::Edit {
                id,
                title,
                description,
                priority,
                due,
            } => {
                let patch = TaskForm {
                    title,
                    description,
                    priority,
                    due_date: due,
                }
                .into_patch()?;

                if patch.is_empty() {
                    return Ok(Reply::text(format!("Nothing to change for task {}.", id)));
                }

                match self.store.update(&id, patch).await {
                    Ok(task) => {
                        info!("Task {} updated", task.id);
                        Reply::text(format!("Updated task {}.", task.id))
                    }
                    Err(e) if e.is_not_found() => Reply::text(not_found(&id)),
                    Err(e) => return Err(e.into()),
                }
            }
            Command::Toggle { id } => match self.store.toggle_completion(&id).await {
                Ok(task) => {
                    let state = if task.completed { "completed" } else { "pending" };
                    info!("Task {} marked {}", task.id, state);
                    Reply::text(format!("Task {} is now {}.", task.id, state))
                }
                Err(e) if e.is_not_found() => Reply::text(not_found(&id)),
                Err(e) => return Err(e.into()),
            },
            Command::Remove { id } => {
                if self.store.delete(&id).await? {
                    info!("Task {} deleted", id);
                    Reply::text(format!("Deleted task {}.", id))
                } else {
                    Reply::text(not_found(&id))
                }
            }
            Command::Clear => {
                let total = self.store.count_total().await;
                if self.config.confirm_destructive && !confirmed && total > 0 {
                    self.awaiting_clear_confirmation = true;
                    Reply::text(format!("Delete all {} tasks? [y/N]", total))
                } else {
                    self.store.clear_all().await?;
                    info!("All tasks cleared");
                    Reply::text("All tasks cleared.")
                }
            }
            Command::Stats => {
                let counts = self.store.counts().await?;
                Reply::text(view::render_counts(&counts))
            }
            Command::Json => {
                let tasks = self.store.snapshot().await;
                Reply::text(serde_json::to_string_pretty(&*tasks)?)
            }
            Command::Quit => Reply {
                text: "Bye.".to_string(),
                quit: true,
            },
        };

        Ok(reply)
    }
}

fn not_found(id: &str) -> String {
    format!("No task with id {}.", id)
}
