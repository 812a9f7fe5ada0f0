//! Database layer - store trait, connection pool and implementations
//!
//! # Design Principles
//!
//! - The catalog only sees `dyn QuestionStore`
//! - Connection pool with a small fixed limit - no Arc<Mutex<Connection>>
//! - Rely on DB constraints for writes - no check-then-insert

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use postgres::PgStore;
pub use store::{QuestionStore, StoreError, StoreResult};
