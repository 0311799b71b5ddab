pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Registers the `/users` and `/tasks` scopes under the `/api` prefix.
///
/// Literal task routes (`/userTasks`, `/deleteAllTasks`) are registered
/// before the `/{id}` routes so they are matched first.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::register)
            .service(users::login)
            .service(users::logout)
            .service(users::list_users)
            .service(users::get_user)
            .service(users::replace_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_all_tasks)
            .service(tasks::list_user_tasks)
            .service(tasks::create_task)
            .service(tasks::patch_completion)
            .service(tasks::delete_many_tasks)
            .service(tasks::delete_all_tasks)
            .service(tasks::get_task)
            .service(tasks::replace_task)
            .service(tasks::delete_task),
    );
}
