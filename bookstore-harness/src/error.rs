pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Occurs when `bookstore.toml` fails to load.
    #[error("failed to load bookstore.toml: {0}")]
    Load(String),
    /// Occurs when the specified key is not found in the configuration.
    #[error("the specified key \"{0}\" not found in the configuration")]
    ValueNotFound(String),
}
