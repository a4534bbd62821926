use crate::entities::*;
use chrono::Utc;
use sea_orm::*;
use todos_core::{DEFAULT_COLOR, Todo, TodoId, TodoInput};

pub mod api;

/// Error type for TodoService operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoServiceError {
    /// Represents a todo not found error.
    #[error("Todo not found")]
    TodoNotFound(TodoId),
    /// Represents a database error.
    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<todo::Model> for Todo {
    fn from(model: todo::Model) -> Self {
        Todo {
            id: TodoId::new(model.id as u32),
            text: model.text,
            is_marked: model.is_marked,
            color: model.color,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// CRUD access to the todo collection.
pub struct TodoService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TodoService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TodoService<'_> {
        TodoService { db }
    }

    /// Retrieves every todo in insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_todos(&self) -> Result<Vec<Todo>, TodoServiceError> {
        let todos = todo::Entity::find()
            .order_by_asc(todo::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Todo::from)
            .collect();
        Ok(todos)
    }

    /// Creates a new todo, applying the default color and an unmarked state
    /// when the input does not supply them.
    ///
    /// # Returns
    ///
    /// The created `Todo`, including the identifier assigned by the database.
    #[tracing::instrument(skip(self))]
    pub async fn create_todo(&self, input: TodoInput) -> Result<Todo, TodoServiceError> {
        let active_model = todo::ActiveModel {
            text: ActiveValue::Set(input.text),
            is_marked: ActiveValue::Set(input.is_marked.unwrap_or(false)),
            color: ActiveValue::Set(input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string())),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        tracing::info!("Created todo {}", created_model.id);
        Ok(Todo::from(created_model))
    }

    /// Retrieves a todo by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_todo_by_id(&self, id: TodoId) -> Result<Todo, TodoServiceError> {
        let model = self.find_model(id).await?;
        Ok(Todo::from(model))
    }

    /// Updates a todo by its ID.
    ///
    /// The text is always replaced. Color and completion flag are only
    /// replaced when present in the input.
    ///
    /// # Returns
    ///
    /// The updated `Todo`, or `TodoNotFound` if no todo has the given ID.
    #[tracing::instrument(skip(self))]
    pub async fn update_todo_by_id(
        &self,
        id: TodoId,
        input: TodoInput,
    ) -> Result<Todo, TodoServiceError> {
        let todo_to_update = self.find_model(id).await?;

        let mut active_model: todo::ActiveModel = todo_to_update.into();
        active_model.text = ActiveValue::Set(input.text);
        if let Some(color) = input.color {
            active_model.color = ActiveValue::Set(color);
        }
        if let Some(is_marked) = input.is_marked {
            active_model.is_marked = ActiveValue::Set(is_marked);
        }
        let updated_model = active_model.update(self.db).await?;

        Ok(Todo::from(updated_model))
    }

    /// Deletes a todo by its ID.
    ///
    /// # Returns
    ///
    /// The deleted `Todo`, or `TodoNotFound` if no todo has the given ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete_todo_by_id(&self, id: TodoId) -> Result<Todo, TodoServiceError> {
        let todo_to_delete = self.find_model(id).await?;

        let deleted = Todo::from(todo_to_delete.clone());
        todo::Entity::delete_by_id(todo_to_delete.id)
            .exec(self.db)
            .await?;
        Ok(deleted)
    }

    /// Flips the completion flag of a todo and persists it.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_todo_by_id(&self, id: TodoId) -> Result<Todo, TodoServiceError> {
        let todo_to_toggle = self.find_model(id).await?;

        let is_marked = !todo_to_toggle.is_marked;
        let mut active_model: todo::ActiveModel = todo_to_toggle.into();
        active_model.is_marked = ActiveValue::Set(is_marked);
        let toggled_model = active_model.update(self.db).await?;

        Ok(Todo::from(toggled_model))
    }

    async fn find_model(&self, id: TodoId) -> Result<todo::Model, TodoServiceError> {
        let Ok(key) = i32::try_from(id.get()) else {
            return Err(TodoServiceError::TodoNotFound(id));
        };
        todo::Entity::find_by_id(key)
            .one(self.db)
            .await?
            .ok_or(TodoServiceError::TodoNotFound(id))
    }
}
