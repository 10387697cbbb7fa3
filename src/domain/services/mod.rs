pub mod document_service;
pub mod password_policy;
pub mod password_service;
pub mod token_service;
