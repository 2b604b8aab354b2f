//! Typed CRUD over each entity.
//!
//! Every function validates its input before touching storage. Mutations that
//! read-then-write run in a transaction and lock the parent row where the
//! backend supports row locks.

pub mod competition;
pub mod competition_registration;
pub mod portfolio_item;
pub mod service_lead;
pub mod user;
pub mod workshop;
pub mod workshop_registration;

use sea_orm::sea_query::LockType;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, EntityTrait,
    QuerySelect, Select, SqliteTransactionMode, TransactionOptions, TransactionTrait,
};

/// Begin a read-then-write transaction. On SQLite the write lock is taken at
/// `BEGIN`, so concurrent writers wait their turn instead of failing to
/// upgrade a shared lock.
pub(crate) async fn begin_write(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_options(TransactionOptions {
        sqlite_transaction_mode: Some(SqliteTransactionMode::Immediate),
        ..Default::default()
    })
    .await
}

/// Add `FOR UPDATE` on backends with row-level locking. SQLite serializes
/// writers on its own.
pub(crate) fn for_update<E, C>(select: Select<E>, conn: &C) -> Select<E>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    match conn.get_database_backend() {
        DbBackend::Postgres | DbBackend::MySql => select.lock(LockType::Update),
        _ => select,
    }
}
