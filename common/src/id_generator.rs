use rand::Rng;

use crate::SessionId;

const SESSION_ID_LENGTH: usize = 32;
const SESSION_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Random lowercase alphanumeric id, safe to put in a cookie value.
pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let id: String = (0..SESSION_ID_LENGTH)
        .map(|_| SESSION_ID_ALPHABET[rng.random_range(0..SESSION_ID_ALPHABET.len())] as char)
        .collect();
    SessionId::new(id)
}
