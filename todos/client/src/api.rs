use serde::Deserialize;
use serde::de::DeserializeOwned;
use todos_core::{Todo, TodoId, TodoInput};

/// Errors returned by a [`TodoApi`] call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with an error status.
    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },
}

/// Operations the todos REST API offers.
///
/// Update and delete answer with the whole collection, while create and
/// toggle answer with the single affected todo.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait TodoApi {
    /// Fetches every todo.
    async fn list_todos(&self) -> Result<Vec<Todo>, ApiError>;
    /// Creates a todo and returns it with its assigned id.
    async fn create_todo(&self, input: TodoInput) -> Result<Todo, ApiError>;
    /// Updates a todo and returns the refreshed collection.
    async fn update_todo(&self, id: TodoId, input: TodoInput) -> Result<Vec<Todo>, ApiError>;
    /// Deletes a todo and returns the refreshed collection.
    async fn delete_todo(&self, id: TodoId) -> Result<Vec<Todo>, ApiError>;
    /// Flips the completion flag of a todo and returns it.
    async fn toggle_todo(&self, id: TodoId) -> Result<Todo, ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`TodoApi`] implementation talking JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTodoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn todo_url(&self, id: TodoId) -> String {
        format!("{}/api/todos/{}", self.base_url, id)
    }

    fn mark_url(&self, id: TodoId) -> String {
        format!("{}/api/todos/{}/mark", self.base_url, id)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("An unknown error occurred")
                .to_string(),
        };
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

impl TodoApi for HttpTodoApi {
    #[tracing::instrument(skip(self))]
    async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.client.get(self.todos_url()).send().await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn create_todo(&self, input: TodoInput) -> Result<Todo, ApiError> {
        let response = self
            .client
            .post(self.todos_url())
            .json(&input)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_todo(&self, id: TodoId, input: TodoInput) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .client
            .put(self.todo_url(id))
            .json(&input)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_todo(&self, id: TodoId) -> Result<Vec<Todo>, ApiError> {
        let response = self.client.delete(self.todo_url(id)).send().await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn toggle_todo(&self, id: TodoId) -> Result<Todo, ApiError> {
        let response = self.client.patch(self.mark_url(id)).send().await?;
        Self::read_json(response).await
    }
}
