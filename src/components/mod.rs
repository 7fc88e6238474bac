//! UI Components
//!
//! Reusable Leptos components.

mod new_task_form;
mod task_item;
mod task_list_view;

pub use new_task_form::NewTaskForm;
pub use task_item::TaskItem;
pub use task_list_view::{TaskListView, TaskSummary};
