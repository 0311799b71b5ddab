use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{CompletionPatch, ReplaceTaskRequest, TaskInput},
    repo,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves every task in the store, regardless of owner.
///
/// Administrative/debug listing. It still sits behind the bearer-token
/// middleware like the rest of the task surface, but applies no owner filter.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects (possibly empty).
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn list_all_tasks(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let tasks = repo::tasks::list_all(&pool).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves the authenticated caller's tasks.
///
/// A caller with no tasks gets `404 Not Found` rather than an empty array;
/// clients of the original API distinguish "nothing yet" this way.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of the caller's `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the caller owns no tasks.
#[get("/userTasks")]
pub async fn list_user_tasks(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = repo::tasks::list_by_owner(&pool, caller.0).await?;

    if tasks.is_empty() {
        return Err(AppError::NotFound("No tasks found".into()));
    }

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated caller.
///
/// The task id is assigned server-side and the owner is stamped from the
/// verified token; any id or owner in the request body is ignored.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `name`: 1–45 characters (required).
/// - `category`: up to 45 characters.
/// - `description`: up to 100 characters.
/// - `is_completed` (optional, default false).
/// - `due_date` (optional).
/// - `is_repeatable` (optional, default false).
/// - `repetition_frequency` (optional): up to 45 characters.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `409 Conflict`: If the generated id collides with an existing row.
/// - `422 Unprocessable Entity`: If input validation fails.
#[post("/userTasks")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = repo::tasks::create(&pool, task_data.into_inner(), caller.0).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Applies a batch of completion-flag patches for the caller's tasks.
///
/// The batch is all-or-nothing: if any entry references a task that does not
/// exist or belongs to someone else, no entry is applied and the whole batch
/// reports `404`.
///
/// ## Request Body:
/// A JSON array of `{"task_id": ..., "is_completed": ...}` objects.
///
/// ## Responses:
/// - `204 No Content`: All patches applied.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If any referenced task is missing or foreign; nothing
///   is committed in that case.
#[patch("/userTasks")]
pub async fn patch_completion(
    pool: web::Data<PgPool>,
    patches: web::Json<Vec<CompletionPatch>>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    repo::tasks::patch_completion(&pool, caller.0, &patches).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes the listed tasks belonging to the caller.
///
/// ## Request Body:
/// A JSON array of task ids.
///
/// ## Responses:
/// - `204 No Content`: At least one listed task was deleted.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If none of the listed ids matched a task of the caller.
#[delete("/userTasks")]
pub async fn delete_many_tasks(
    pool: web::Data<PgPool>,
    ids: web::Json<Vec<Uuid>>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let deleted = repo::tasks::delete_many(&pool, caller.0, &ids).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("No tasks found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes every task belonging to the caller.
///
/// ## Responses:
/// - `204 No Content`: At least one task was deleted.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the caller owned no tasks to begin with.
#[delete("/deleteAllTasks")]
pub async fn delete_all_tasks(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let deleted = repo::tasks::delete_all_for_owner(&pool, caller.0).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("No tasks found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Retrieves a specific task by its id.
///
/// The authenticated caller must own the task; a foreign task is
/// indistinguishable from an absent one.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = repo::tasks::get(&pool, task_id.into_inner()).await?;

    match task {
        Some(task) if task.user_id == caller.0 => Ok(HttpResponse::Ok().json(task)),
        Some(_) | None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Full overwrite of a task.
///
/// The body must carry the same id as the path; the caller must own the task.
/// The write is optimistic: if another writer modified the row since it was
/// read, the request fails with `409` and the client should re-fetch and retry.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If the body id does not match the path id.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
/// - `409 Conflict`: If a concurrent write got there first.
/// - `422 Unprocessable Entity`: If input validation fails.
#[put("/{id}")]
pub async fn replace_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<ReplaceTaskRequest>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_id = task_id.into_inner();

    let (body_id, input) = task_data.into_inner().into_parts();
    if task_id != body_id {
        return Err(AppError::BadRequest("Path id does not match body id".into()));
    }

    let task = repo::tasks::replace(&pool, task_id, caller.0, input).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its id. Only the owner can delete it.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    if !repo::tasks::delete(&pool, task_id.into_inner(), caller.0).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
