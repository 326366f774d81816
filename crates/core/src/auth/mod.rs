//! Password hashing for user credentials.
//!
//! Passwords are hashed with Argon2id and stored in PHC string format.

mod password;

pub use password::{
    MIN_PASSWORD_LENGTH, PasswordError, hash_password, validate_password, verify_password,
};
