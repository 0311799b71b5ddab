//!
//! # Data Access Layer
//!
//! Thin repositories over the `users` and `tasks` tables. Each function takes
//! the shared `PgPool`, uses runtime-checked parameterized queries, and
//! returns typed outcomes (`AppError` variants, `Option`, row counts). The
//! mapping of those outcomes to HTTP status codes happens exclusively in the
//! route handlers.
//!
//! Task operations that take an `owner` id are scoped to it in the SQL
//! itself, so a caller can never touch another user's rows through them.

pub mod tasks;
pub mod users;
