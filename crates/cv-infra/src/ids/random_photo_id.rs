use cv_core::ports::PhotoIdGeneratorPort;
use cv_core::{CvId, PhotoId};
use rand::Rng;

const SALT_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SALT_LEN: usize = 9;

/// Photo ids of the form `photo_<cvId>_<millis>_<salt>` with a random
/// lowercase base-36 salt.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPhotoIdGenerator;

impl RandomPhotoIdGenerator {
    pub fn new() -> Self {
        Self
    }

    fn salt(&self) -> String {
        let mut rng = rand::rng();
        (0..SALT_LEN)
            .map(|_| SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())] as char)
            .collect()
    }
}

impl PhotoIdGeneratorPort for RandomPhotoIdGenerator {
    fn generate(&self, cv_id: &CvId, now_ms: i64) -> PhotoId {
        PhotoId::compose(cv_id, now_ms, &self.salt())
    }
}
