use core::fmt;

/// A POSIX style path on a remote host.
///
/// SFTP servers on embedded devices resolve paths relative to the session's
/// root directory, so the rooted form is converted before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    path: String,
}

impl RemotePath {
    /// Creates a new remote path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Joins a file name onto a remote directory.
    pub fn join(directory: &str, file_name: &str) -> Self {
        if directory.is_empty() {
            Self::new(file_name)
        } else if directory.ends_with('/') {
            Self::new(format!("{directory}{file_name}"))
        } else {
            Self::new(format!("{directory}/{file_name}"))
        }
    }

    /// The path as given.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The final component of the path.
    pub fn file_name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// The path without its leading root, `.` for the root itself.
    pub fn without_root(&self) -> String {
        strip_root(&self.path)
    }

    /// The parent directory without its leading root, `.` for the root itself.
    pub fn parent_without_root(&self) -> String {
        let trimmed = self.path.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(index) => strip_root(trimmed.get(..index).unwrap_or_default()),
            None => ".".to_string(),
        }
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

fn strip_root(path: &str) -> String {
    let stripped = path.trim_start_matches('/');
    if stripped.is_empty() {
        ".".to_string()
    } else {
        stripped.to_string()
    }
}
