use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` against the pool; used by the readiness probe.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL: {}", e)))?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
