pub mod project;
pub mod task;

pub use project::{Project, ProjectInput};
pub use task::{Task, TaskInput};
