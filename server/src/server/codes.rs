//! Room-code generation.

use std::collections::HashMap;

use rand::seq::IndexedRandom;

use super::state::Room;

/// Uppercase A-Z minus the easily confused O and I.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
pub const CODE_LEN: usize = 6;

/// Generate a room code that is not currently registered. The search space
/// is 24^6 (~191M), so collision retries terminate quickly at any realistic
/// room count.
pub fn generate_room_code(rooms: &HashMap<String, Room>) -> String {
    loop {
        let code = random_code();
        if !rooms.contains_key(&code) {
            return code;
        }
    }
}

fn random_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| *CODE_ALPHABET.choose(&mut rng).unwrap_or(&b'A') as char)
        .collect()
}
