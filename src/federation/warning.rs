//! Non-fatal configuration findings.

/// A condition worth reporting that does not stop configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The derived serving port is 0 because the URL's trailing segment
    /// is not a valid port.
    InvalidPort { url: String },

    /// The project's own variable produced a remote entry for itself.
    SelfReference { name: String, key: String },

    /// Several variables map to the same remote name; `key` replaced the
    /// earlier entry.
    DuplicateRemote { name: String, key: String },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort { url } => {
                write!(f, "No valid port in '{}'; serving port defaults to 0", url)
            }
            Self::SelfReference { name, key } => write!(
                f,
                "Remote '{}' from {} refers to this project itself",
                name, key
            ),
            Self::DuplicateRemote { name, key } => write!(
                f,
                "Remote '{}' is defined more than once; {} takes precedence",
                name, key
            ),
        }
    }
}
