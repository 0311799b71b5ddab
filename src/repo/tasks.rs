use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CompletionPatch, Task, TaskInput};

const TASK_COLUMNS: &str = "id, user_id, name, category, description, is_completed, due_date, \
                            is_repeatable, repetition_frequency, version";

/// Every task in the store, regardless of owner. Administrative/debug use;
/// the per-user listing is `list_by_owner`.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks ORDER BY due_date NULLS LAST, name",
        TASK_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

pub async fn list_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY due_date NULLS LAST, name",
        TASK_COLUMNS
    ))
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Inserts a new task owned by `owner`.
///
/// The id is generated server-side; any id the client sent has already been
/// discarded by the input type. An id collision trips the primary key and
/// surfaces as `AppError::Conflict` instead of being assumed impossible.
pub async fn create(pool: &PgPool, input: TaskInput, owner: Uuid) -> Result<Task, AppError> {
    let task = Task::new(input, owner);

    let created = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, user_id, name, category, description, is_completed, due_date, \
         is_repeatable, repetition_frequency, version)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(task.user_id)
    .bind(task.name)
    .bind(task.category)
    .bind(task.description)
    .bind(task.is_completed)
    .bind(task.due_date)
    .bind(task.is_repeatable)
    .bind(task.repetition_frequency)
    .bind(task.version)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Full overwrite of a task with optimistic concurrency.
///
/// Ownership is checked first and a foreign task reports `NotFound`, the same
/// as an absent one. The write is conditional on the version observed during
/// that check; a lost race yields `ConcurrencyConflict`.
pub async fn replace(
    pool: &PgPool,
    id: Uuid,
    owner: Uuid,
    input: TaskInput,
) -> Result<Task, AppError> {
    let row = sqlx::query_as::<_, (Uuid, i64)>("SELECT user_id, version FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let version = match row {
        Some((user_id, version)) if user_id == owner => version,
        Some(_) | None => return Err(AppError::NotFound("Task not found".into())),
    };

    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET name = $1, category = $2, description = $3, is_completed = $4, \
         due_date = $5, is_repeatable = $6, repetition_frequency = $7, version = version + 1
         WHERE id = $8 AND user_id = $9 AND version = $10
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(input.name)
    .bind(input.category)
    .bind(input.description)
    .bind(input.is_completed)
    .bind(input.due_date)
    .bind(input.is_repeatable)
    .bind(input.repetition_frequency)
    .bind(id)
    .bind(owner)
    .bind(version)
    .fetch_optional(pool)
    .await?;

    match updated {
        Some(task) => Ok(task),
        None => {
            // Zero rows: either the row was modified after our read, or it vanished.
            let still_exists = sqlx::query_scalar::<_, i64>(
                "SELECT version FROM tasks WHERE id = $1 AND user_id = $2",
            )
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await?;
            match still_exists {
                Some(_) => Err(AppError::ConcurrencyConflict(
                    "Task was modified concurrently".into(),
                )),
                None => Err(AppError::NotFound("Task not found".into())),
            }
        }
    }
}

/// Applies a batch of completion-flag patches as a single unit.
///
/// Runs inside one transaction: if any referenced task does not exist or is
/// not owned by `owner`, nothing is committed and the whole batch reports
/// `NotFound`. An empty batch matches zero tasks and reports the same.
pub async fn patch_completion(
    pool: &PgPool,
    owner: Uuid,
    patches: &[CompletionPatch],
) -> Result<(), AppError> {
    if patches.is_empty() {
        return Err(AppError::NotFound("No tasks referenced".into()));
    }

    let mut tx = pool.begin().await?;

    for patch in patches {
        let result = sqlx::query(
            "UPDATE tasks SET is_completed = $1, version = version + 1
             WHERE id = $2 AND user_id = $3",
        )
        .bind(patch.is_completed)
        .bind(patch.task_id)
        .bind(owner)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Returning without committing rolls the transaction back,
            // so earlier patches in the batch are discarded too.
            return Err(AppError::NotFound("Task not found".into()));
        }
    }

    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid, owner: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes the listed tasks belonging to `owner` in a single statement.
/// Returns the number of rows removed; ids that do not exist or belong to
/// someone else simply do not match.
pub async fn delete_many(pool: &PgPool, owner: Uuid, ids: &[Uuid]) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE user_id = $1 AND id = ANY($2)")
        .bind(owner)
        .bind(ids)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_all_for_owner(pool: &PgPool, owner: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE user_id = $1")
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
