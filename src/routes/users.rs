use crate::{
    auth::{
        hash_password, verify_password, AuthenticatedUserId, LoginRequest, TokenResponse,
        TokenService,
    },
    error::AppError,
    models::{ReplaceUserRequest, UserInput},
    repo,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Creates a new account with a server-generated id and returns it.
/// The response carries the id and username only; the password hash is
/// never part of any payload.
#[post("")]
pub async fn register(
    pool: web::Data<PgPool>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    user_data.validate()?;

    // Hash password
    let password_hash = hash_password(&user_data.password)?;

    // A duplicate username surfaces as 409 via the unique constraint
    let user = repo::users::insert(&pool, &user_data.username, &password_hash).await?;

    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// Authenticates a user by username and password and returns a bearer token.
/// An unknown username is 404 and a wrong password 401, matching the
/// long-standing behavior clients depend on.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let credentials = repo::users::find_credentials(&pool, &login_data.username).await?;

    let Some(credentials) = credentials else {
        return Err(AppError::NotFound("User not found".into()));
    };

    if !verify_password(&login_data.password, &credentials.password_hash) {
        return Err(AppError::Unauthorized("Invalid password".into()));
    }

    let token = tokens.issue(credentials.id)?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Logout user
///
/// Stateless no-op: tokens simply expire. Kept so clients have a uniform
/// session lifecycle to call into.
#[post("/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out successfully"
    }))
}

/// List all registered users (id and username only).
#[get("")]
pub async fn list_users(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let users = repo::users::list(&pool).await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Fetch a single user by id.
#[get("/{id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let user = repo::users::find(&pool, user_id.into_inner()).await?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound("User not found".into())),
    }
}

/// Replace a user account.
///
/// The path id, the body id, and the caller's verified identity must all
/// agree: a mismatched body id is a bad request, and an attempt to replace
/// someone else's account reads as 404 so account ids cannot be probed.
/// The submitted password is re-hashed before storage.
#[put("/{id}")]
pub async fn replace_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    user_data: web::Json<ReplaceUserRequest>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;
    let user_id = user_id.into_inner();

    if user_id != user_data.id {
        return Err(AppError::BadRequest("Path id does not match body id".into()));
    }
    if user_id != caller.0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    let password_hash = hash_password(&user_data.password)?;
    repo::users::replace(&pool, user_id, &user_data.username, &password_hash).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user account and, via the schema's cascade, all tasks it owns.
/// Only the account's own bearer token can delete it.
#[delete("/{id}")]
pub async fn delete_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();

    if user_id != caller.0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    if !repo::users::delete(&pool, user_id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::models::UserInput;
    use validator::Validate;

    #[test]
    fn test_register_input_validation() {
        let valid = UserInput {
            username: "alice".to_string(),
            password: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_username = UserInput {
            username: "al ice!".to_string(),
            password: "secret123".to_string(),
        };
        assert!(bad_username.validate().is_err());

        let short_password = UserInput {
            username: "alice".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password.validate().is_err());
    }
}
