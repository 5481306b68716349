/// Errors raised while connecting to or probing the database
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
