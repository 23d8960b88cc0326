use std::sync::Arc;

use agdb::{DbAny, DbError, QueryBuilder};
use derive_more::Deref;
use parking_lot::RwLock;

use crate::fs::state_dir;

#[derive(Debug, Clone, Deref)]
pub(crate) struct Db {
    #[deref]
    db: Arc<RwLock<DbAny>>,
}

impl Db {
    pub fn new() -> Self {
        let path = state_dir().join("interns.db");
        let path_str = path.to_str().unwrap();

        let mut db = Self {
            db: Arc::new(RwLock::new(DbAny::new_file(path_str).unwrap())),
        };

        db.init();

        db
    }

    fn init(&mut self) {
        let alias_count = self
            .db
            .read()
            .exec(QueryBuilder::select().aliases().query())
            .unwrap()
            .result;

        // Insert the collection root if it doesn't exist
        if alias_count == 0 {
            self.db
                .write()
                .transaction_mut(|t| -> Result<(), DbError> {
                    t.exec_mut(QueryBuilder::insert().nodes().aliases(["interns"]).query())?;

                    Ok(())
                })
                .unwrap();
        }
    }

    /// Create a memory backed database for use in tests
    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        let mut db = Self {
            db: Arc::new(RwLock::new(DbAny::new_memory("test").unwrap())),
        };

        db.init();

        db
    }
}
