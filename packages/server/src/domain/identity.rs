//! Identity generation.

use rand::Rng;

/// Characters an identity is drawn from
pub const IDENTITY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default identity length
pub const IDENTITY_LENGTH: usize = 6;

/// Source of fresh identity candidates.
///
/// Candidates are not guaranteed to be unique; the registry checks them
/// against the live identities and asks again on collision.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniformly random identities over [`IDENTITY_ALPHABET`]
#[derive(Debug, Clone, Copy)]
pub struct RandomIdentityGenerator {
    length: usize,
}

impl RandomIdentityGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomIdentityGenerator {
    fn default() -> Self {
        Self::new(IDENTITY_LENGTH)
    }
}

impl IdentityGenerator for RandomIdentityGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| IDENTITY_ALPHABET[rng.gen_range(0..IDENTITY_ALPHABET.len())] as char)
            .collect()
    }
}
