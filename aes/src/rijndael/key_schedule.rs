use crate::gf::arithmetic::xtime;
use crate::rijndael::sbox::sbox;
use symmetric_cipher::crypto::key_expansion::KeyExpansion;

/// Number of rounds for a key of `key_len` bytes, `None` for lengths AES does
/// not define.
pub fn rounds_for_key(key_len: usize) -> Option<usize> {
    match key_len {
        16 => Some(10),
        24 => Some(12),
        32 => Some(14),
        _ => None,
    }
}

fn sub_word(word: [u8; 4]) -> [u8; 4] {
    word.map(sbox)
}

fn rot_word(word: [u8; 4]) -> [u8; 4] {
    [word[1], word[2], word[3], word[0]]
}

/// FIPS-197 key expansion: `Nr + 1` round keys of 16 bytes each.
///
/// `key` must be 16, 24 or 32 bytes; callers validate with
/// [`rounds_for_key`] first.
pub fn expand_key(key: &[u8]) -> Vec<Vec<u8>> {
    debug_assert!(rounds_for_key(key.len()).is_some(), "AES key must be 16, 24 or 32 bytes");

    let nk = key.len() / 4;
    let nr = nk + 6;
    let total_words = 4 * (nr + 1);

    let mut words: Vec<[u8; 4]> = key
        .chunks_exact(4)
        .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
        .collect();
    words.reserve(total_words - nk);

    let mut rcon = 0x01u8;
    for i in nk..total_words {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= rcon;
            rcon = xtime(rcon);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }

        let prev = words[i - nk];
        words.push([
            prev[0] ^ temp[0],
            prev[1] ^ temp[1],
            prev[2] ^ temp[2],
            prev[3] ^ temp[3],
        ]);
    }

    words
        .chunks_exact(4)
        .map(|round| round.iter().flatten().copied().collect())
        .collect()
}

/// `KeyExpansion` adapter over [`expand_key`].
pub struct AesKeyExpansion;

impl KeyExpansion for AesKeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> Vec<Vec<u8>> {
        expand_key(key)
    }
}
