use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use passvault_client_core::auth::{TokenStore, non_empty_token};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenFileError {
    #[error("token file read failed for {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("token file write failed for {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("token file remove failed for {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Bearer token persisted as the sole contents of a file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: io::Error) -> TokenFileError {
        TokenFileError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    type Error = TokenFileError;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(non_empty_token(Some(&raw))),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TokenFileError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save_token(&self, token: &str) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }
        fs::write(&self.path, token).map_err(|source| self.write_error(source))?;
        restrict_permissions(&self.path).map_err(|source| self.write_error(source))
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenFileError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
