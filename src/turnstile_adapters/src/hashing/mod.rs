pub mod argon2_credential_hasher;

pub use argon2_credential_hasher::Argon2CredentialHasher;
