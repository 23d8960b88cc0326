use std::sync::Arc;

use agdb::{Comparison, DbId, QueryBuilder};
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    Error, Result,
    config::{Cfg, CoreConfig},
    repository::db::Db,
};

mod db;
mod record;

pub use record::{InternPatch, InternRecord, JoinDate, NewIntern, intern_id};

/// Central access point for all persistent data.
///
/// The [`Repository`] wraps the intern collection and the configuration
/// file behind one interface. Reads return plain [`InternRecord`]
/// snapshots; views re-fetch after every write instead of holding live
/// handles.
#[derive(Clone, Debug)]
pub struct Repository {
    db: Db,
    cfg: Cfg,
}

impl Repository {
    pub fn new() -> Self {
        Self {
            db: Db::new(),
            cfg: Arc::new(RwLock::new(CoreConfig::load())),
        }
    }

    /// Every intern record, in store order. No pagination; the collection
    /// is assumed small enough for full scans.
    pub fn interns(&self) -> Result<Vec<InternRecord>> {
        Ok(self
            .db
            .read()
            .exec(
                QueryBuilder::select()
                    .search()
                    .from("interns")
                    .where_()
                    .neighbor()
                    .query(),
            )?
            .elements
            .iter()
            .map(InternRecord::from_element)
            .collect())
    }

    pub fn intern(&self, id: &str) -> Result<InternRecord> {
        self.db
            .read()
            .exec(
                QueryBuilder::select()
                    .search()
                    .from("interns")
                    .where_()
                    .neighbor()
                    .and()
                    .key("id")
                    .value(Comparison::Equal(id.into()))
                    .query(),
            )?
            .elements
            .first()
            .map(InternRecord::from_element)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Exact match on both credential fields.
    ///
    /// The store may hold several matching records; whichever it returns
    /// first wins, and that order is not guaranteed stable.
    pub fn find_by_credentials(&self, username: &str, password: &str) -> Result<InternRecord> {
        self.db
            .read()
            .exec(
                QueryBuilder::select()
                    .search()
                    .from("interns")
                    .where_()
                    .neighbor()
                    .and()
                    .key("username")
                    .value(Comparison::Equal(username.into()))
                    .and()
                    .key("password")
                    .value(Comparison::Equal(password.into()))
                    .query(),
            )?
            .elements
            .first()
            .map(InternRecord::from_element)
            .ok_or(Error::NoMatch)
    }

    /// Insert a record, resolving creation-time defaults.
    ///
    /// An existing record with the same id is silently replaced; creation
    /// performs no uniqueness check.
    pub fn add_intern(&self, new: NewIntern) -> Result<InternRecord> {
        let record = new.into_record(Utc::now());
        let existing = self.find_db_id(&record.id)?;
        let values = record.db_values();

        self.db.write().transaction_mut(|t| -> Result<()> {
            if let Some(db_id) = existing {
                t.exec_mut(QueryBuilder::remove().ids(db_id).query())?;
            }

            let db_id = t
                .exec_mut(QueryBuilder::insert().nodes().values(vec![values]).query())?
                .elements
                .first()
                .expect("a successful insert should return the new element")
                .id;

            t.exec_mut(
                QueryBuilder::insert()
                    .edges()
                    .from("interns")
                    .to(db_id)
                    .query(),
            )?;

            Ok(())
        })?;

        debug!("Added intern: {}", record.id);

        Ok(record)
    }

    /// Merge the populated fields of `patch` into an existing record.
    pub fn update_intern(&self, id: &str, patch: &InternPatch) -> Result<()> {
        let db_id = self
            .find_db_id(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let values = patch.db_values();
        if values.is_empty() {
            return Ok(());
        }

        self.db.write().exec_mut(
            QueryBuilder::insert()
                .values(vec![values])
                .ids(db_id)
                .query(),
        )?;

        debug!("Updated intern: {id}");

        Ok(())
    }

    pub fn remove_intern(&self, id: &str) -> Result<()> {
        let db_id = self
            .find_db_id(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        self.db
            .write()
            .exec_mut(QueryBuilder::remove().ids(db_id).query())?;

        debug!("Removed intern: {id}");

        Ok(())
    }

    /// The configured admin login pair.
    pub fn admin_credentials(&self) -> (String, String) {
        let cfg = self.cfg.read();
        (cfg.admin_username.clone(), cfg.admin_password.clone())
    }

    fn find_db_id(&self, id: &str) -> Result<Option<DbId>> {
        Ok(self
            .db
            .read()
            .exec(
                QueryBuilder::search()
                    .from("interns")
                    .where_()
                    .neighbor()
                    .and()
                    .key("id")
                    .value(Comparison::Equal(id.into()))
                    .query(),
            )?
            .elements
            .first()
            .map(|element| element.id))
    }

    /// Return a mock version of a [`Repository`] with an in-memory database
    /// and default configuration.
    #[cfg(test)]
    pub(crate) fn mock() -> Self {
        Self {
            db: Db::in_memory(),
            cfg: Arc::new(RwLock::new(CoreConfig::mock())),
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
