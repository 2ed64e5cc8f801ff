//! Training snapshots.
//!
//! A [`TrainingSnapshot`] is one consistent set of rows from one completed
//! fetch. Every collection defaults to empty, so a partial file still loads.
//!
//! Progress rows are normalised here, before any core code sees them: the
//! task reference may arrive as `task_id` or as the legacy
//! `training_task_id`, and completion as a `completed` or `is_completed`
//! flag or a `status` string.

use kiwitrain_core::serde::{deserialize_null_default, deserialize_optional_opaque};
use kiwitrain_models::{
    Department, TaskId, TaskProgress, TrainingModule, TrainingPhase, TrainingTask, User, UserId,
};
use kiwitrain_progress::{CompletionIndex, HierarchyIndex};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to access snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Status strings that count as completed.
const COMPLETED_STATUSES: [&str; 3] = ["completed", "done", "finished"];

#[derive(Deserialize)]
struct ProgressRow {
    user_id: UserId,
    #[serde(default, deserialize_with = "deserialize_optional_opaque")]
    task_id: Option<TaskId>,
    #[serde(default, deserialize_with = "deserialize_optional_opaque")]
    training_task_id: Option<TaskId>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    is_completed: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    status: String,
}

impl ProgressRow {
    fn into_progress(self) -> Option<TaskProgress> {
        let task_id = self.task_id.or(self.training_task_id)?;
        let status = self.status.trim().to_ascii_lowercase();
        let completed = self.completed.unwrap_or(false)
            || self.is_completed.unwrap_or(false)
            || COMPLETED_STATUSES.contains(&status.as_str());

        Some(TaskProgress {
            user_id: self.user_id,
            task_id,
            completed,
        })
    }
}

fn deserialize_progress_rows<'de, D>(deserializer: D) -> Result<Vec<TaskProgress>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<ProgressRow> = deserialize_null_default(deserializer)?;
    let total = rows.len();
    let progress: Vec<TaskProgress> = rows
        .into_iter()
        .filter_map(ProgressRow::into_progress)
        .collect();

    if progress.len() < total {
        debug!(
            dropped = total - progress.len(),
            "Dropped progress rows without a task reference"
        );
    }
    Ok(progress)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSnapshot {
    #[serde(deserialize_with = "deserialize_null_default")]
    pub departments: Vec<Department>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub phases: Vec<TrainingPhase>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub modules: Vec<TrainingModule>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub tasks: Vec<TrainingTask>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub users: Vec<User>,
    #[serde(deserialize_with = "deserialize_progress_rows")]
    pub progress: Vec<TaskProgress>,
}

impl TrainingSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and parse a snapshot file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let snapshot = Self::from_json(&raw)?;
        info!(
            departments = snapshot.departments.len(),
            modules = snapshot.modules.len(),
            tasks = snapshot.tasks.len(),
            users = snapshot.users.len(),
            progress = snapshot.progress.len(),
            "Loaded training snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(path, self.to_json_pretty()?)
            .await
            .map_err(io_error)?;

        info!("Saved training snapshot");
        Ok(())
    }

    pub fn index(&self) -> HierarchyIndex {
        HierarchyIndex::build(&self.departments, &self.phases, &self.modules, &self.tasks)
    }

    pub fn completion(&self) -> CompletionIndex {
        CompletionIndex::from_rows(&self.progress)
    }

    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwitrain_progress::CompletionSource;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let snapshot = TrainingSnapshot::from_json(r#"{"departments":[{"id":1,"name":"Ops"}]}"#)
            .unwrap();
        assert_eq!(snapshot.departments.len(), 1);
        assert_eq!(snapshot.departments[0].id.as_str(), "1");
        assert!(snapshot.users.is_empty());
        assert!(snapshot.progress.is_empty());

        let snapshot = TrainingSnapshot::from_json(r#"{"users":null,"progress":null}"#).unwrap();
        assert!(snapshot.users.is_empty());
        assert!(snapshot.progress.is_empty());
    }

    #[test]
    fn test_progress_rows_are_normalised() {
        let snapshot = TrainingSnapshot::from_json(
            r#"{"progress":[
                {"user_id":"u1","task_id":"t1","completed":true},
                {"user_id":"u1","training_task_id":"t2","status":"Completed"},
                {"user_id":"u1","task_id":"t3","status":"in_progress","completed":null},
                {"user_id":2,"task_id":4,"status":"done"},
                {"user_id":"u1","status":"completed"},
                {"user_id":"u1","task_id":"t5","is_completed":true},
                {"user_id":"u1","task_id":"t6","is_completed":false,"completed":null}
            ]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.progress.len(), 6);
        let completion = snapshot.completion();
        assert!(completion.is_completed(&UserId::from("u1"), &TaskId::from("t1")));
        assert!(completion.is_completed(&UserId::from("u1"), &TaskId::from("t2")));
        assert!(!completion.is_completed(&UserId::from("u1"), &TaskId::from("t3")));
        assert!(completion.is_completed(&UserId::from(2), &TaskId::from(4)));
        assert!(completion.is_completed(&UserId::from("u1"), &TaskId::from("t5")));
        assert!(!completion.is_completed(&UserId::from("u1"), &TaskId::from("t6")));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = TrainingSnapshot::from_json("{").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
        assert!(err.to_string().starts_with("Snapshot JSON error"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let err = TrainingSnapshot::load("/definitely/not/here.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("kiwitrain-snapshot-{}", std::process::id()));
        let path = dir.join("nested").join("snapshot.json");
        let snapshot = TrainingSnapshot {
            departments: vec![Department::new("D1", "Sales", 1)],
            progress: vec![TaskProgress::new("u1", "t1", true)],
            ..Default::default()
        };

        snapshot.save(&path).await.unwrap();
        let loaded = TrainingSnapshot::load(&path).await.unwrap();
        assert_eq!(loaded, snapshot);

        let _ = std::fs::remove_dir_all(dir);
    }
}
