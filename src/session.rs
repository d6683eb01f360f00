use std::{
    fs::{self, File},
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::User;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file {path} is corrupt: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    user: User,
    logged_in_at: DateTime<Utc>,
}

/// The signed-in user, saved to disk on every change.
///
/// `login` and `logout` are the only ways to change it.
#[derive(Debug, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Option<PersistedSession>,
}

impl SessionStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Restore the session saved at `path`, if any.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let current = match File::open(&path) {
            Ok(file) => {
                info!("Loading session {:?}", &path);
                let reader = BufReader::new(file);
                let session = serde_json::from_reader(reader).map_err(|source| {
                    SessionError::Json {
                        path: path.clone(),
                        source,
                    }
                })?;
                Some(session)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        Ok(Self {
            path: Some(path),
            current,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|session| &session.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().map(|session| session.logged_in_at)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn login(&mut self, user: User) -> Result<(), SessionError> {
        let session = PersistedSession {
            user,
            logged_in_at: Utc::now(),
        };
        if let Some(path) = &self.path {
            save(path, &session)?;
        }
        self.current = Some(session);
        Ok(())
    }

    /// Forget the user and the persisted copy.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.current = None;
        let Some(path) = &self.path else {
            return Ok(());
        };

        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Removed session {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: path.clone(),
                source,
            }),
        }
    }
}

fn save(path: &Path, session: &PersistedSession) -> Result<(), SessionError> {
    let io_error = |source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let data = serde_json::to_vec_pretty(session).map_err(|source| SessionError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, data).map_err(io_error)?;
    debug!("Saved session {:?}", path);
    Ok(())
}
