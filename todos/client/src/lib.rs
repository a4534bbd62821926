//! Client side of the todos application: the HTTP API client and the board
//! state that the UI renders.
pub mod api;
pub mod board;

pub use api::{ApiError, HttpTodoApi, TodoApi};
pub use board::{BoardUpdate, Submission, TodoBoard};
