//! State behind the todo board UI.
//!
//! A `TodoBoard` holds the todo list last acknowledged by the server, the
//! draft bound to the input form, and the id of the todo being edited.
//!
//! Talking to the server is kept apart from the board. The functions at the
//! bottom of this module run one request each and hand back a
//! [`BoardUpdate`], which the caller folds into the current board with
//! [`TodoBoard::apply`]. Requests that overlap never hold a copy of the
//! board, so one answer cannot undo another. Failures are logged and yield
//! no update.

use crate::api::TodoApi;
use todos_core::{DEFAULT_COLOR, Todo, TodoId, TodoInput};

/// Request built from the draft by [`TodoBoard::take_submission`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(TodoInput),
    Update(TodoId, TodoInput),
}

/// A server answer waiting to be folded into the board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardUpdate {
    /// The whole collection, as answered by list, update and delete.
    Replace(Vec<Todo>),
    /// A freshly created todo.
    Created(Todo),
    /// A todo whose completion flag was flipped.
    Toggled(Todo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoBoard {
    draft_text: String,
    draft_color: String,
    todos: Vec<Todo>,
    editing: Option<TodoId>,
}

impl Default for TodoBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoBoard {
    pub fn new() -> Self {
        Self {
            draft_text: String::new(),
            draft_color: DEFAULT_COLOR.to_string(),
            todos: Vec::new(),
            editing: None,
        }
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn draft_color(&self) -> &str {
        &self.draft_color
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Returns the id of the todo currently being edited, if any.
    pub fn editing(&self) -> Option<TodoId> {
        self.editing
    }

    pub fn is_editing(&self, id: TodoId) -> bool {
        self.editing == Some(id)
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    pub fn set_draft_color(&mut self, color: impl Into<String>) {
        self.draft_color = color.into();
    }

    /// Turns the draft into a request and resets the form.
    ///
    /// While a todo is being edited the draft becomes an update of it,
    /// otherwise an unmarked new todo. The draft and the edit target are
    /// cleared right away, so whatever happens to the request the form is
    /// ready for the next entry. An empty draft yields nothing and leaves the
    /// board untouched.
    pub fn take_submission(&mut self) -> Option<Submission> {
        if self.draft_text.is_empty() {
            return None;
        }

        let input = TodoInput::new(std::mem::take(&mut self.draft_text))
            .with_color(std::mem::replace(&mut self.draft_color, DEFAULT_COLOR.to_string()));
        let submission = match self.editing.take() {
            Some(id) => Submission::Update(id, input),
            None => Submission::Create(input.with_marked(false)),
        };
        Some(submission)
    }

    /// Folds a server answer into the list.
    ///
    /// A toggle only patches the completion flag of the matching todo, and
    /// is dropped if that todo is no longer on the board.
    pub fn apply(&mut self, update: BoardUpdate) {
        match update {
            BoardUpdate::Replace(todos) => self.todos = todos,
            BoardUpdate::Created(todo) => self.todos.push(todo),
            BoardUpdate::Toggled(toggled) => {
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == toggled.id) {
                    todo.is_marked = toggled.is_marked;
                }
            }
        }
    }

    /// Copies a todo into the draft and marks it as the edit target.
    ///
    /// Completed todos cannot be edited.
    pub fn begin_edit(&mut self, id: TodoId) {
        let Some(todo) = self.todos.iter().find(|todo| todo.id == id) else {
            tracing::warn!("Cannot edit unknown todo {}", id);
            return;
        };
        if todo.is_marked {
            return;
        }

        self.draft_text = todo.text.clone();
        self.draft_color = todo.color.clone();
        self.editing = Some(id);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft_text.clear();
        self.draft_color = DEFAULT_COLOR.to_string();
    }
}

/// Fetches the whole collection.
pub async fn load(api: &impl TodoApi) -> Option<BoardUpdate> {
    match api.list_todos().await {
        Ok(todos) => Some(BoardUpdate::Replace(todos)),
        Err(err) => {
            tracing::error!("Failed to load todos: {}", err);
            None
        }
    }
}

/// Sends a submission taken from the board.
pub async fn submit(api: &impl TodoApi, submission: Submission) -> Option<BoardUpdate> {
    match submission {
        Submission::Update(id, input) => match api.update_todo(id, input).await {
            Ok(todos) => Some(BoardUpdate::Replace(todos)),
            Err(err) => {
                tracing::error!("Failed to update todo {}: {}", id, err);
                None
            }
        },
        Submission::Create(input) => match api.create_todo(input).await {
            Ok(todo) => Some(BoardUpdate::Created(todo)),
            Err(err) => {
                tracing::error!("Failed to add todo: {}", err);
                None
            }
        },
    }
}

/// Deletes a todo; the answer replaces the list.
pub async fn remove(api: &impl TodoApi, id: TodoId) -> Option<BoardUpdate> {
    match api.delete_todo(id).await {
        Ok(todos) => Some(BoardUpdate::Replace(todos)),
        Err(err) => {
            tracing::error!("Failed to delete todo {}: {}", id, err);
            None
        }
    }
}

/// Flips a todo's completion flag.
pub async fn toggle(api: &impl TodoApi, id: TodoId) -> Option<BoardUpdate> {
    match api.toggle_todo(id).await {
        Ok(todo) => Some(BoardUpdate::Toggled(todo)),
        Err(err) => {
            tracing::error!("Failed to toggle todo {}: {}", id, err);
            None
        }
    }
}
