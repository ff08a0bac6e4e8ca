mod password;

pub use password::{digest_password, digests_match};
