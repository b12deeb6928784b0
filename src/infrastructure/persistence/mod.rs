mod sqlite_pool;
mod sqlite_record_store;

pub use sqlite_pool::create_pool;
pub use sqlite_record_store::SqliteRecordStore;
