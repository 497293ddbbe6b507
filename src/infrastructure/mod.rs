pub mod argon2_password_hasher;
pub mod user_registration_repository;
