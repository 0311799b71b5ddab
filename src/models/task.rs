use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or replacing a task.
/// Contains validation rules for its fields.
///
/// Any client-supplied id or owner is ignored; both are always stamped
/// server-side from the generated id and the verified caller identity.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The name of the task. Must be between 1 and 45 characters.
    #[validate(length(min = 1, max = 45))]
    pub name: String,

    /// Free-text category, at most 45 characters.
    #[validate(length(max = 45))]
    pub category: String,

    /// Longer description, at most 100 characters.
    #[validate(length(max = 100))]
    pub description: String,

    /// Completion flag.
    #[serde(default)]
    pub is_completed: bool,

    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,

    /// Whether the task repeats.
    #[serde(default)]
    pub is_repeatable: bool,

    /// Free-text repetition frequency (e.g. "weekly"), at most 45 characters.
    #[validate(length(max = 45))]
    pub repetition_frequency: Option<String>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4), assigned server-side.
    pub id: Uuid,
    /// Identifier of the user who owns the task. Immutable after creation.
    pub user_id: Uuid,
    /// The name of the task.
    pub name: String,
    /// Free-text category.
    pub category: String,
    /// Longer description.
    pub description: String,
    /// Completion flag.
    pub is_completed: bool,
    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the task repeats.
    pub is_repeatable: bool,
    /// Free-text repetition frequency.
    pub repetition_frequency: Option<String>,
    /// Row version used for optimistic concurrency. Bumped on every write;
    /// internal bookkeeping, never serialized into responses.
    #[serde(skip_serializing)]
    pub version: i64,
}

/// Payload for `PUT /api/tasks/{id}`: a full replace of the task.
///
/// The embedded id must match the path id or the request is rejected as a
/// bad request, mirroring the create/replace asymmetry: create ignores ids,
/// replace demands agreement on one.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceTaskRequest {
    pub id: Uuid,
    #[validate(length(min = 1, max = 45))]
    pub name: String,
    #[validate(length(max = 45))]
    pub category: String,
    #[validate(length(max = 100))]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_repeatable: bool,
    #[validate(length(max = 45))]
    pub repetition_frequency: Option<String>,
}

impl ReplaceTaskRequest {
    /// Splits the request into the client-asserted id and the replacement fields.
    pub fn into_parts(self) -> (Uuid, TaskInput) {
        (
            self.id,
            TaskInput {
                name: self.name,
                category: self.category,
                description: self.description,
                is_completed: self.is_completed,
                due_date: self.due_date,
                is_repeatable: self.is_repeatable,
                repetition_frequency: self.repetition_frequency,
            },
        )
    }
}

/// One entry of a batch completion patch: `PATCH /api/tasks/userTasks`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionPatch {
    pub task_id: Uuid,
    pub is_completed: bool,
}

impl Task {
    /// Creates a new `Task` instance from `TaskInput` and the owner's id.
    /// Assigns a fresh UUID and starts the version counter at zero.
    pub fn new(input: TaskInput, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: input.name,
            category: input.category,
            description: input.description,
            is_completed: input.is_completed,
            due_date: input.due_date,
            is_repeatable: input.is_repeatable,
            repetition_frequency: input.repetition_frequency,
            version: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let owner = Uuid::new_v4();
        let input = TaskInput {
            name: "Buy milk".to_string(),
            category: "errand".to_string(),
            description: "2%".to_string(),
            is_completed: false,
            due_date: Some(Utc::now()),
            is_repeatable: false,
            repetition_frequency: None,
        };

        let task = Task::new(input, owner);
        assert_eq!(task.name, "Buy milk");
        assert_eq!(task.user_id, owner);
        assert_eq!(task.version, 0);
        assert!(!task.is_completed);
    }

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            name: "Valid Task".to_string(),
            category: "home".to_string(),
            description: "Valid Description".to_string(),
            is_completed: false,
            due_date: None,
            is_repeatable: true,
            repetition_frequency: Some("weekly".to_string()),
        };
        assert!(valid_input.validate().is_ok());

        // Empty name
        let invalid_input = TaskInput {
            name: "".to_string(),
            category: "home".to_string(),
            description: "Valid Description".to_string(),
            is_completed: false,
            due_date: None,
            is_repeatable: false,
            repetition_frequency: None,
        };
        assert!(invalid_input.validate().is_err());

        // Name longer than the 45-character column
        let invalid_input = TaskInput {
            name: "a".repeat(46),
            category: "home".to_string(),
            description: "Valid Description".to_string(),
            is_completed: false,
            due_date: None,
            is_repeatable: false,
            repetition_frequency: None,
        };
        assert!(invalid_input.validate().is_err());

        // Description longer than the 100-character column
        let invalid_input = TaskInput {
            name: "Valid Task".to_string(),
            category: "home".to_string(),
            description: "b".repeat(101),
            is_completed: false,
            due_date: None,
            is_repeatable: false,
            repetition_frequency: None,
        };
        assert!(invalid_input.validate().is_err());
    }

    #[test]
    fn test_version_not_serialized() {
        let task = Task::new(
            TaskInput {
                name: "hidden version".to_string(),
                category: "".to_string(),
                description: "".to_string(),
                is_completed: false,
                due_date: None,
                is_repeatable: false,
                repetition_frequency: None,
            },
            Uuid::new_v4(),
        );
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("version").is_none());
        assert!(json.get("id").is_some());
    }

    #[test]
    fn test_replace_request_into_parts() {
        let id = Uuid::new_v4();
        let request = ReplaceTaskRequest {
            id,
            name: "Renamed".to_string(),
            category: "errand".to_string(),
            description: "".to_string(),
            is_completed: true,
            due_date: None,
            is_repeatable: false,
            repetition_frequency: None,
        };
        let (asserted_id, input) = request.into_parts();
        assert_eq!(asserted_id, id);
        assert_eq!(input.name, "Renamed");
        assert!(input.is_completed);
    }
}
