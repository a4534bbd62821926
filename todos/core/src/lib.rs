//! Core domain models shared by the todos server and client.
pub mod todo;
pub mod validation;

pub use todo::{DEFAULT_COLOR, InvalidTodoId, Todo, TodoId, TodoInput};
pub use validation::validate_todo_input;
