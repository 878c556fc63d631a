mod task;

pub use task::{NewTask, Task, TaskRequest, TaskResponse, TaskStatus};
