//! Common password list
//!
//! Frequently used passwords that registration rejects regardless of their
//! strength score. A [`CommonPasswords`] value is built from a file (usually
//! through [`ClientConfig::load_common_passwords`](crate::ClientConfig::load_common_passwords))
//! and installed process-wide for the register form to consult.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

static INSTALLED: RwLock<Option<Arc<CommonPasswords>>> = RwLock::new(None);

#[derive(Error, Debug)]
pub enum CommonPasswordsError {
    #[error("Common password list not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read common password list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Common password list has no entries")]
    Empty,
}

/// Case-insensitive set of common passwords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPasswords {
    entries: HashSet<String>,
}

impl CommonPasswords {
    /// One password per line; entries are trimmed and lowercased, blank
    /// lines are skipped.
    pub fn parse(content: &str) -> Result<Self, CommonPasswordsError> {
        let entries: HashSet<String> = content
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();

        if entries.is_empty() {
            return Err(CommonPasswordsError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CommonPasswordsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CommonPasswordsError::NotFound(path.to_path_buf())
            } else {
                CommonPasswordsError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        });

        let list = content.and_then(|content| Self::parse(&content));

        #[cfg(feature = "tracing")]
        {
            match &list {
                Ok(list) => {
                    tracing::info!(entries = list.len(), path = %path.display(), "common password list loaded")
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "common password list failed")
                }
            }
        }

        list
    }

    pub fn contains(&self, password: &str) -> bool {
        self.entries.contains(&password.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Makes `list` the one registration checks against, replacing any earlier
/// list. Returns its size.
pub fn install_common_passwords(list: CommonPasswords) -> usize {
    let count = list.len();
    *INSTALLED.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(list));
    count
}

/// The installed list, if any.
pub fn installed_common_passwords() -> Option<Arc<CommonPasswords>> {
    INSTALLED.read().unwrap_or_else(PoisonError::into_inner).clone()
}

pub fn common_passwords_loaded() -> bool {
    installed_common_passwords().is_some()
}

/// Checks the installed list. Returns `false` when none is installed.
pub fn is_common_password(password: &str) -> bool {
    installed_common_passwords().is_some_and(|list| list.contains(password))
}

#[cfg(test)]
pub(crate) fn reset_common_passwords_for_testing() {
    *INSTALLED.write().unwrap_or_else(PoisonError::into_inner) = None;
}
