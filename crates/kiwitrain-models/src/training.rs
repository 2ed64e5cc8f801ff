//! Training hierarchy models.
//!
//! A department owns phases; modules ("training days") belong to a department
//! and optionally to one of its phases; tasks belong to a module. Per-user
//! completion is recorded in [`TaskProgress`] rows.

use crate::ids::{DepartmentId, ModuleId, PhaseId, TaskId, UserId};
use kiwitrain_core::serde::{deserialize_null_default, deserialize_optional_opaque};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows without a `sort_order` sort as if it were zero.
fn sort_key(sort_order: Option<i64>) -> i64 {
    sort_order.unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl Department {
    pub fn new(id: impl Into<DepartmentId>, name: impl Into<String>, sort_order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sort_order: Some(sort_order),
        }
    }

    pub fn sort_key(&self) -> i64 {
        sort_key(self.sort_order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPhase {
    pub id: PhaseId,
    pub department_id: DepartmentId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl TrainingPhase {
    pub fn new(
        id: impl Into<PhaseId>,
        department_id: impl Into<DepartmentId>,
        name: impl Into<String>,
        sort_order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            department_id: department_id.into(),
            name: name.into(),
            description: None,
            sort_order: Some(sort_order),
        }
    }

    pub fn sort_key(&self) -> i64 {
        sort_key(self.sort_order)
    }
}

/// A training day. `phase_id == None` means the module is unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingModule {
    pub id: ModuleId,
    pub department_id: DepartmentId,
    #[serde(default, deserialize_with = "deserialize_optional_opaque")]
    pub phase_id: Option<PhaseId>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl TrainingModule {
    pub fn new(
        id: impl Into<ModuleId>,
        department_id: impl Into<DepartmentId>,
        phase_id: Option<PhaseId>,
        title: impl Into<String>,
        sort_order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            department_id: department_id.into(),
            phase_id,
            title: title.into(),
            sort_order: Some(sort_order),
        }
    }

    pub fn sort_key(&self) -> i64 {
        sort_key(self.sort_order)
    }
}

/// Kind of training task. Unknown kinds are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    /// Fixed team lesson
    #[default]
    Team,
    Homework,
    /// Self study
    SelfStudy,
    Quiz,
    Other(String),
}

impl TaskType {
    pub fn as_str(&self) -> &str {
        match self {
            TaskType::Team => "team",
            TaskType::Homework => "homework",
            TaskType::SelfStudy => "self",
            TaskType::Quiz => "quiz",
            TaskType::Other(s) => s,
        }
    }
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "team" => TaskType::Team,
            "homework" => TaskType::Homework,
            "self" => TaskType::SelfStudy,
            "quiz" => TaskType::Quiz,
            _ => TaskType::Other(s),
        }
    }
}

impl From<TaskType> for String {
    fn from(t: TaskType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingTask {
    pub id: TaskId,
    pub module_id: ModuleId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub task_type: TaskType,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl TrainingTask {
    pub fn new(
        id: impl Into<TaskId>,
        module_id: impl Into<ModuleId>,
        title: impl Into<String>,
        sort_order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            module_id: module_id.into(),
            title: title.into(),
            task_type: TaskType::default(),
            sort_order: Some(sort_order),
        }
    }

    pub fn sort_key(&self) -> i64 {
        sort_key(self.sort_order)
    }
}

/// One user's completion flag for one task.
///
/// The collaborator may send several rows for the same pair; the pair counts
/// as completed when any of them says so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub user_id: UserId,
    pub task_id: TaskId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub completed: bool,
}

impl TaskProgress {
    pub fn new(user_id: impl Into<UserId>, task_id: impl Into<TaskId>, completed: bool) -> Self {
        Self {
            user_id: user_id.into(),
            task_id: task_id.into(),
            completed,
        }
    }
}
