//! Task List
//!
//! The ordered collection of tasks. Everything the UI lists and everything
//! that gets saved is derived from here.

use chrono::{DateTime, Utc};

use crate::models::{NewTask, StoredTask, Task, TaskId};

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl TaskList {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn allocate_id(&mut self) -> TaskId {
        self.next_id += 1;
        self.next_id
    }

    fn push(&mut self, text: String, deadline: Option<DateTime<Utc>>, timer_minutes: Option<u32>, completed: bool) -> TaskId {
        let id = self.allocate_id();
        self.tasks.push(Task {
            id,
            text,
            deadline,
            timer_minutes,
            completed,
        });
        id
    }

    /// Append a new task at the end
    pub fn add(&mut self, draft: NewTask) -> TaskId {
        self.push(draft.text, draft.deadline, draft.timer_minutes, false)
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        Some(self.tasks.remove(index))
    }

    /// Flip completion, returning the new state.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Move `dragged` to sit immediately after `target`.
    ///
    /// Returns false if either id is unknown or they are the same task.
    pub fn move_after(&mut self, dragged: TaskId, target: TaskId) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(_)) = (self.position(dragged), self.position(target)) else {
            return false;
        };
        let task = self.tasks.remove(from);
        // Target index shifts once the dragged task is out
        let Some(to) = self.position(target) else {
            self.tasks.insert(from, task);
            return false;
        };
        self.tasks.insert(to + 1, task);
        true
    }

    /// Snapshot in list order, ready to persist
    pub fn to_records(&self) -> Vec<StoredTask> {
        self.tasks.iter().map(StoredTask::from).collect()
    }

    /// Append tasks rebuilt from storage, returning their new ids in order.
    ///
    /// Blank records are skipped; a zero timer reads as no timer.
    pub fn restore(&mut self, records: Vec<StoredTask>) -> Vec<TaskId> {
        records
            .into_iter()
            .filter_map(|record| {
                let text = record.text.trim();
                if text.is_empty() {
                    log::warn!("[STORE] skipping stored task with blank text");
                    return None;
                }
                let timer = record.timer.filter(|m| *m > 0);
                Some(self.push(text.to_string(), record.deadline, timer, record.completed))
            })
            .collect()
    }
}
