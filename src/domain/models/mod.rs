pub mod credential;
pub mod document;
pub mod resident;
pub mod user;
