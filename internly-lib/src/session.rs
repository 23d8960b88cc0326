//! Login session flags, persisted across invocations.
//!
//! The browser original kept two independent localStorage keys; here they
//! are one small TOML file under the state dir. No expiry, no tokens: the
//! flags are the whole session.

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, InternRecord, Repository, Result, fs::state_dir};

const FILE_NAME: &str = "session.toml";

/// The pair of persisted flags identifying the current actors.
///
/// The two ids are independent: an admin login does not clear an intern
/// login, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intern_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.intern_id.is_none() && self.admin_id.is_none()
    }
}

/// Key-value persistence for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            path: state_dir().join(FILE_NAME),
        }
    }

    /// The persisted session; empty when nobody is logged in.
    pub fn current(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let contents = fs::read_to_string(&self.path)?;

        Ok(toml::from_str(&contents)?)
    }

    /// Validate credentials and persist the resulting session flags.
    ///
    /// The admin branch compares against the configured pair and never
    /// touches the record store; the intern branch is an exact-match store
    /// query. Nothing is persisted on failure, and there is no lockout or
    /// throttling.
    pub fn login(
        &self,
        repo: &Repository,
        username: &str,
        password: &str,
        as_admin: bool,
    ) -> Result<Session> {
        let mut session = self.current()?;

        if as_admin {
            let (admin_username, admin_password) = repo.admin_credentials();
            if username != admin_username || password != admin_password {
                return Err(Error::InvalidCredentials);
            }
            session.admin_id = Some(admin_username);
        } else {
            let record = repo
                .find_by_credentials(username, password)
                .map_err(|err| match err {
                    Error::NoMatch => Error::InvalidCredentials,
                    other => other,
                })?;
            session.intern_id = Some(record.id);
        }

        self.save(&session)?;

        debug!("Session updated: {session:?}");

        Ok(session)
    }

    /// Resolve the signed-in intern's record.
    ///
    /// Fails closed when no intern is signed in. A persisted intern id
    /// whose record is gone is cleared before the `NotFound` surfaces, so
    /// the next login starts clean.
    pub fn current_intern(&self, repo: &Repository) -> Result<InternRecord> {
        let session = self.current()?;
        let Some(intern_id) = session.intern_id else {
            return Err(Error::InvalidCredentials);
        };

        match repo.intern(&intern_id) {
            Ok(record) => Ok(record),
            Err(Error::NotFound(id)) => {
                self.clear_intern()?;
                Err(Error::NotFound(id))
            }
            Err(other) => Err(other),
        }
    }

    /// Drop the intern flag without touching the admin flag. Used when a
    /// persisted intern id no longer resolves to a record, and by the
    /// admin guard.
    pub fn clear_intern(&self) -> Result<Session> {
        let mut session = self.current()?;
        session.intern_id = None;
        self.save(&session)?;

        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.save(&Session::default())
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(session)?;
        fs::write(&self.path, contents)?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn mock(dir: &std::path::Path) -> Self {
        Self {
            path: dir.join(FILE_NAME),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::NewIntern;

    fn repo_with_intern() -> Repository {
        let repo = Repository::mock();
        repo.add_intern(NewIntern {
            name: "Priya Sharma".to_string(),
            username: "priya".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        })
        .unwrap();

        repo
    }

    #[test]
    fn test_intern_login_persists_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        let session = store.login(&repo, "priya", "pw", false).unwrap();
        assert_eq!(session.intern_id.as_deref(), Some("priya"));
        assert_eq!(session.admin_id, None);

        // A fresh store instance reads the same flags back.
        let reread = SessionStore::mock(dir.path()).current().unwrap();
        assert_eq!(reread, session);
    }

    #[test]
    fn test_intern_login_bad_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        assert!(matches!(
            store.login(&repo, "priya", "wrong", false),
            Err(Error::InvalidCredentials)
        ));
        assert!(store.current().unwrap().is_empty());
    }

    #[test]
    fn test_admin_login_checks_fixed_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = Repository::mock();

        let session = store.login(&repo, "admin", "admin123", true).unwrap();
        assert_eq!(session.admin_id.as_deref(), Some("admin"));
        assert_eq!(session.intern_id, None);
    }

    #[test]
    fn test_admin_login_rejects_other_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        // Valid intern credentials with the admin box checked still fail.
        assert!(matches!(
            store.login(&repo, "priya", "pw", true),
            Err(Error::InvalidCredentials)
        ));
        assert!(store.current().unwrap().is_empty());
    }

    #[test]
    fn test_flags_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        store.login(&repo, "priya", "pw", false).unwrap();
        let session = store.login(&repo, "admin", "admin123", true).unwrap();

        assert_eq!(session.intern_id.as_deref(), Some("priya"));
        assert_eq!(session.admin_id.as_deref(), Some("admin"));

        let session = store.clear_intern().unwrap();
        assert_eq!(session.intern_id, None);
        assert_eq!(session.admin_id.as_deref(), Some("admin"));
    }

    #[test]
    fn test_current_intern_resolves_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        store.login(&repo, "priya", "pw", false).unwrap();

        let record = store.current_intern(&repo).unwrap();
        assert_eq!(record.id, "priya");
    }

    #[test]
    fn test_current_intern_fails_closed_without_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        assert!(matches!(
            store.current_intern(&repo),
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn test_current_intern_clears_stale_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        store.login(&repo, "priya", "pw", false).unwrap();
        store.login(&repo, "admin", "admin123", true).unwrap();

        // The record disappears out from under the persisted id.
        repo.remove_intern("priya").unwrap();

        assert!(matches!(
            store.current_intern(&repo),
            Err(Error::NotFound(_))
        ));

        let session = store.current().unwrap();
        assert_eq!(session.intern_id, None);
        assert_eq!(session.admin_id.as_deref(), Some("admin"));
    }

    #[test]
    fn test_logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::mock(dir.path());
        let repo = repo_with_intern();

        store.login(&repo, "priya", "pw", false).unwrap();
        store.logout().unwrap();

        assert!(store.current().unwrap().is_empty());
    }
}
