/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    /// A stored value no longer matches the shape the domain expects.
    #[error("repository.corrupted_value")]
    CorruptedValue,
    #[error("repository.database_error")]
    DatabaseError,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn corrupted_value() -> Self {
        RepositoryError::CorruptedValue
    }
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
}
