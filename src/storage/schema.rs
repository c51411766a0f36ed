//! Schema initializer: idempotent table creation at startup.
//!
//! There is no migration support; column changes are applied out of band.

use super::{Database, Statement, StorageError};
use crate::domain::model::TableModel;

pub async fn ensure_tables(
    db: &dyn Database,
    models: &[&dyn TableModel],
) -> Result<(), StorageError> {
    for model in models {
        db.execute(Statement::new(model.get_create_table_sql()))
            .await?;
        tracing::info!(table = model.table_name(), "table ready");
    }
    Ok(())
}
