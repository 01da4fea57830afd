//! # Query Execution Gateway
//!
//! Executes whatever statement the [`QueryTranslator`] produces for a free-text
//! prompt and returns the statement together with the materialized rows.
//!
//! The statement is run verbatim: no parsing, allow-listing or parameter
//! binding happens here. Any caller of this gateway can therefore read, modify
//! or drop anything the database role can reach. Treat it as a trust boundary.

pub mod rows;

use crate::{error::AppError, translator::QueryTranslator};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

pub use rows::{row_to_record, Record};

/// Extra time the client waits after the server-side timeout should have fired.
const STATEMENT_GRACE: Duration = Duration::from_secs(1);

/// The `{message, data}` envelope returned by the query endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QueryOutcome {
    /// The SQL statement exactly as the translator produced it.
    pub message: String,
    /// One JSON object per result row, in the order the store returned them.
    pub data: Vec<Record>,
}

/// Translates prompts and runs the resulting statements inside a transaction.
pub struct QueryGateway {
    translator: Arc<dyn QueryTranslator>,
    deadline: Duration,
}

impl QueryGateway {
    /// `deadline` bounds the translation and the execution separately.
    pub fn new(translator: Arc<dyn QueryTranslator>, deadline: Duration) -> Self {
        Self {
            translator,
            deadline,
        }
    }

    /// Translates `prompt` and executes the statement against `pool`.
    ///
    /// The statement runs in its own transaction, which is committed when it
    /// succeeds and rolled back otherwise. No partial results are returned.
    pub async fn execute(&self, pool: &PgPool, prompt: &str) -> Result<QueryOutcome, AppError> {
        let statement = match timeout(self.deadline, self.translator.translate(prompt)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(AppError::Translation(format!(
                    "translation timed out after {}s",
                    self.deadline.as_secs_f32()
                )))
            }
        };
        log::info!("Executing translated statement: {}", statement);

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::QueryExecution(e.to_string()))?;

        // Dropping the future does not stop the server, so it enforces the deadline itself
        let limit = format!(
            "SET LOCAL statement_timeout = {}",
            self.deadline.as_millis().max(1)
        );
        (&mut *tx)
            .execute(limit.as_str())
            .await
            .map_err(|e| AppError::QueryExecution(e.to_string()))?;

        // Simple-query protocol: nothing is prepared or cached, and every
        // column arrives as text
        let fetched = timeout(
            self.deadline + STATEMENT_GRACE,
            (&mut *tx).fetch_all(statement.as_str()),
        )
        .await;

        let failure = match fetched {
            Ok(Ok(rows)) => match rows.iter().map(row_to_record).collect::<Result<Vec<_>, _>>() {
                Ok(data) => {
                    tx.commit()
                        .await
                        .map_err(|e| AppError::QueryExecution(e.to_string()))?;
                    return Ok(QueryOutcome {
                        message: statement,
                        data,
                    });
                }
                Err(e) => e.to_string(),
            },
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "statement timed out after {}s",
                self.deadline.as_secs_f32()
            ),
        };

        if let Err(e) = tx.rollback().await {
            log::error!("Rollback after failed statement also failed: {}", e);
        }
        log::warn!("Rolled back translated statement: {}", failure);
        Err(AppError::QueryExecution(failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use sqlx::postgres::PgPoolOptions;

    struct FailingTranslator;

    impl QueryTranslator for FailingTranslator {
        fn translate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, AppError>> {
            Box::pin(async { Err(AppError::Translation("model unavailable".into())) })
        }
    }

    struct SlowTranslator;

    impl QueryTranslator for SlowTranslator {
        fn translate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, AppError>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok("SELECT 1".to_string())
            })
        }
    }

    // Never connects unless a statement actually reaches the store.
    fn unused_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap()
    }

    #[test_log::test(actix_rt::test)]
    async fn test_translation_failure_is_surfaced() {
        let gateway = QueryGateway::new(Arc::new(FailingTranslator), Duration::from_secs(1));
        let result = gateway.execute(&unused_pool(), "list all users").await;

        match result {
            Err(AppError::Translation(msg)) => assert_eq!(msg, "model unavailable"),
            other => panic!("expected a translation error, got {:?}", other),
        }
    }

    #[test_log::test(actix_rt::test)]
    async fn test_translation_is_bounded_by_deadline() {
        let gateway = QueryGateway::new(Arc::new(SlowTranslator), Duration::from_millis(50));
        let result = gateway.execute(&unused_pool(), "list all users").await;

        match result {
            Err(AppError::Translation(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[test_log::test(actix_rt::test)]
    async fn test_unreachable_store_is_an_execution_error() {
        struct Fixed;
        impl QueryTranslator for Fixed {
            fn translate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, AppError>> {
                Box::pin(async { Ok("SELECT 1".to_string()) })
            }
        }

        let gateway = QueryGateway::new(Arc::new(Fixed), Duration::from_secs(2));
        let result = gateway.execute(&unused_pool(), "anything").await;
        assert!(matches!(result, Err(AppError::QueryExecution(_))));
    }
}
