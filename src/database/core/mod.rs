//! Core database infrastructure
//!
//! This module provides the foundational database components:
//! - `DatabaseSession`: the session abstraction every schema operation runs against
//! - `DatabaseConn`: SQLite connection wrapper implementing `DatabaseSession`

mod connection;
mod session;

pub use connection::DatabaseConn;
pub use session::{text_at, DatabaseSession, SqlRow, SqlValue};
