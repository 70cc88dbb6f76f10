//! Identifier generation.

use uuid::Uuid;

const BLOCK_ID_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A random UUID v4 for a design.
pub fn new_design_id() -> String {
    Uuid::new_v4().to_string()
}

/// A short random id for a block or template: 9 lowercase base36 characters.
pub fn new_block_id() -> String {
    encode_base36(Uuid::new_v4().as_u128())
}

fn encode_base36(mut value: u128) -> String {
    let mut out = [b'0'; BLOCK_ID_LEN];
    for slot in out.iter_mut().rev() {
        *slot = BASE36[(value % 36) as usize];
        value /= 36;
    }
    out.iter().map(|&b| b as char).collect()
}
