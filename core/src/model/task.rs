use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type TaskId = u64;

/// Member names that belong to the record itself and never land in `extra`.
const RESERVED_FIELDS: [&str; 3] = ["id", "title", "completed"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,

    // Clients may attach their own members to a task. They are stored
    // and returned as-is, after the known fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            extra: Map::new(),
        }
    }

    /// Merges the supplied fields into this task. The id never changes.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.extra.extend(without_reserved(patch.extra));
    }
}

/// Body of a create request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: Option<String>,
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Builds the stored record, or `None` when no title was supplied.
    pub fn into_task(self, id: TaskId) -> Option<Task> {
        let title = self.title?;
        Some(Task {
            id,
            title,
            completed: self.completed.unwrap_or(false),
            extra: without_reserved(self.extra),
        })
    }
}

/// Body of an update request. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn without_reserved(mut fields: Map<String, Value>) -> Map<String, Value> {
    for name in RESERVED_FIELDS {
        fields.remove(name);
    }
    fields
}
