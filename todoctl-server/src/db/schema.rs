//! Table definitions, created idempotently at startup

use sqlx::PgPool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS todo (
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS todo_item (
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        todo_id BIGINT NOT NULL REFERENCES todo(id),
        name VARCHAR(255) NOT NULL,
        description TEXT,
        is_completed BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS todo_item_todo_id_idx ON todo_item (todo_id)",
];

/// Create the `todo` and `todo_item` tables if they are missing.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring todo schema...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Todo schema ready");
    Ok(())
}
