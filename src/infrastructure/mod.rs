pub mod bcrypt_password_hasher;
pub mod document_generators;
pub mod entity;
pub mod jwt_token_service;
pub mod user_repository;
