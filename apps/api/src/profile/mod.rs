// Candidate profile persistence (Postgres via sqlx).

pub mod handlers;
pub mod store;
