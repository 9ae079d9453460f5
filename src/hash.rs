//! Email → avatar identifier.
//!
//! Gravatar keys avatars by the MD5 digest of the email address. The address
//! is hashed exactly as given: callers that want case-insensitive matching
//! must normalize before handing it to the builder.

use md5::{Digest, Md5};

/// Lowercase hex MD5 of the UTF-8 bytes of `email`. Always 32 characters.
pub fn email_hash(email: &str) -> String {
    let digest = Md5::digest(email.as_bytes());
    format!("{:x}", digest)
}
