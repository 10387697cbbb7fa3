use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDeactivated,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Password must be at least {0} characters long and contain both letters and numbers.")]
    WeakPassword(usize),

    #[error("Password must be at most {0} bytes long.")]
    PasswordTooLong(usize),

    #[error("Username is required")]
    EmptyUsername,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("System is already set up")]
    AlreadySetUp,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid resident id: {0}")]
    InvalidResidentId(String),

    #[error("Invalid document reference: {0}")]
    InvalidDocumentReference(String),

    #[error("Unknown user role: {0}")]
    UnknownRole(String),

    #[error("User already has role {0}")]
    RoleUnchanged(String),

    #[error("{0} requirements are not met")]
    DocumentRequirementsNotMet(String),

    #[error("Password hashing is unavailable: {0}")]
    HashingUnavailable(String),

    #[error("Failed to issue token: {0}")]
    TokenIssue(String),
}

impl DomainError {
    /// Error for a failed insert of a new account. A duplicate row means
    /// another request claimed the username first.
    pub fn from_account_insert(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Duplicate(_) => DomainError::UsernameTaken,
            e => DomainError::Repository(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
