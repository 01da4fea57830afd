//! Schema bootstrap.
//!
//! Creates the `task_status` enum and the `users`/`tasks` tables when they are
//! missing. Existing objects are left untouched; this is not a migration system.

use sqlx::PgPool;

const SCHEMA: [&str; 3] = [
    r#"DO $$ BEGIN
        CREATE TYPE task_status AS ENUM ('Pending', 'Completed');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$"#,
    r#"CREATE TABLE IF NOT EXISTS users (
        user_id  SERIAL PRIMARY KEY,
        username VARCHAR(50)  NOT NULL,
        email    VARCHAR(255) NOT NULL UNIQUE,
        password TEXT         NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS tasks (
        task_id     SERIAL PRIMARY KEY,
        todo        TEXT        NOT NULL,
        status      task_status NOT NULL DEFAULT 'Pending',
        "createdAt" TIMESTAMPTZ NOT NULL DEFAULT now(),
        "isExist"   BOOLEAN     NOT NULL DEFAULT TRUE,
        user_id     INTEGER     NOT NULL REFERENCES users (user_id) ON DELETE CASCADE
    )"#,
];

// Serializes concurrent bootstraps; `IF NOT EXISTS` alone races on the catalog.
const SCHEMA_LOCK_KEY: i64 = 0x7461_736b_7175_6572;

/// Ensures every table the record stores rely on exists.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    log::debug!("Database schema is in place");
    Ok(())
}
