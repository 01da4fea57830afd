//! # Query Translator
//!
//! Turns a free-text prompt into a single SQL statement. The gateway treats the
//! returned text as opaque and executes it verbatim, so nothing here promises
//! that the statement is valid, read-only or safe.

pub mod chat;

use crate::error::AppError;
use futures::future::BoxFuture;

pub use chat::ChatTranslator;

/// Produces a SQL statement from a natural-language prompt.
pub trait QueryTranslator: Send + Sync {
    /// Translates `prompt` into a SQL statement.
    ///
    /// Failures should be reported as `AppError::Translation`.
    fn translate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AppError>>;
}

/// Pulls the statement out of a model reply.
///
/// Surrounding whitespace is trimmed, and a Markdown code fence (optionally
/// tagged with a language such as `sql`) is unwrapped.
pub fn extract_statement(reply: &str) -> String {
    let trimmed = reply.trim();

    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the info string on the opening fence line ("sql", "postgresql", ...)
    let body = match fenced.find('\n') {
        Some(newline) => &fenced[newline + 1..],
        None => fenced,
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    body.trim().to_string()
}
