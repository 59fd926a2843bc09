mod new_todo_input;
mod todo_row;

pub use new_todo_input::NewTodoInput;
pub use todo_row::TodoRow;
