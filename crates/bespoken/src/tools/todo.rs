use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::errors::{AgentError, AgentResult};
use crate::models::tool::{Tool, ToolCall, ToolParameter};
use crate::toolbox::Toolbox;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub task: String,
    pub done: bool,
    pub created: DateTime<Utc>,
    pub completed: Option<DateTime<Utc>>,
}

/// An in-memory todo list the model can keep for itself
pub struct TodoTools {
    tools: Vec<Tool>,
    todos: Mutex<Vec<Todo>>,
}

impl Default for TodoTools {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoTools {
    pub fn new() -> Self {
        Self {
            tools: vec![
                Tool::new(
                    "add_todo",
                    "Add a new todo item.",
                    vec![ToolParameter::required("task", "What needs doing")],
                ),
                Tool::new("list_todos", "List all todos with their status.", vec![]),
                Tool::new(
                    "mark_todo_done",
                    "Mark a todo as completed.",
                    vec![ToolParameter::required(
                        "index",
                        "1-based position in the list",
                    )],
                ),
                Tool::new("flush_todos", "Delete all todos.", vec![]),
            ],
            todos: Mutex::new(Vec::new()),
        }
    }

    /// A snapshot of the current list
    pub fn todos(&self) -> AgentResult<Vec<Todo>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> AgentResult<MutexGuard<'_, Vec<Todo>>> {
        self.todos
            .lock()
            .map_err(|_| AgentError::Internal("todo list lock poisoned".into()))
    }

    fn add_todo(&self, task: &str) -> AgentResult<String> {
        info!("Adding todo: {}", task);
        self.lock()?.push(Todo {
            task: task.to_string(),
            done: false,
            created: Utc::now(),
            completed: None,
        });
        Ok(format!("Added todo: '{}'", task))
    }

    fn list_todos(&self) -> AgentResult<String> {
        info!("Listing todos");
        let todos = self.lock()?;
        if todos.is_empty() {
            return Ok("No todos found. Add one with add_todo()".to_string());
        }

        let mut lines = vec!["Todo List:".to_string()];
        for (i, todo) in todos.iter().enumerate() {
            let status = if todo.done { "✓" } else { "○" };
            lines.push(format!("{}. [{}] {}", i + 1, status, todo.task));
        }
        Ok(lines.join("\n"))
    }

    fn mark_todo_done(&self, index: &str) -> AgentResult<String> {
        info!("Marking todo #{} as done", index);
        let position: usize = index.trim().parse().map_err(|_| {
            AgentError::InvalidParameters(format!("'{}' is not a todo number", index))
        })?;

        let mut todos = self.lock()?;
        let count = todos.len();
        let todo = position
            .checked_sub(1)
            .and_then(|i| todos.get_mut(i))
            .ok_or_else(|| {
                AgentError::InvalidParameters(format!(
                    "No todo #{} (the list has {} item(s))",
                    position, count
                ))
            })?;

        todo.done = true;
        todo.completed = Some(Utc::now());
        Ok(format!("Marked as done: '{}'", todo.task))
    }

    fn flush_todos(&self) -> AgentResult<String> {
        info!("Flushing all todos");
        self.lock()?.clear();
        Ok("Flushed todos. All todos have been deleted.".to_string())
    }
}

#[async_trait]
impl Toolbox for TodoTools {
    fn name(&self) -> &str {
        "TodoTools"
    }

    fn description(&self) -> &str {
        "Keep a todo list while working through a task"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<String> {
        match tool_call.name.as_str() {
            "add_todo" => self.add_todo(tool_call.argument(0, "task")?),
            "list_todos" => self.list_todos(),
            "mark_todo_done" => self.mark_todo_done(tool_call.argument(0, "index")?),
            "flush_todos" => self.flush_todos(),
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}
