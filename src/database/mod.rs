//! ReadAssist database layer.
//!
//! SQLite storage behind the page's key-value preference store.
//!
//! # Usage
//!
//! ```no_run
//! use readassist::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("readassist.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
