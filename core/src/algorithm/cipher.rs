//! Reference cipher and checksum implementations.
//!
//! The classical ciphers operate on the uppercase Latin alphabet; anything
//! else in a plaintext or key is a precondition violation, not something to
//! silently skip. Ciphers with inverses satisfy
//! `decrypt(encrypt(x, k), k) == x` for every valid x and k.

use crate::error::HarnessError;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub(crate) fn ensure_uppercase_letters(text: &str, what: &str) -> Result<(), HarnessError> {
    if let Some(bad) = text.chars().find(|c| !c.is_ascii_uppercase()) {
        return Err(HarnessError::invalid_input(format!(
            "{what} must contain only uppercase ASCII letters, found {bad:?}"
        )));
    }
    Ok(())
}

/// Build the 5x5 Polybius square for a key: key letters first (deduplicated),
/// then the rest of the alphabet, with J folded into I.
fn polybius_square(key: &str) -> Result<[u8; 25], HarnessError> {
    ensure_uppercase_letters(key, "key")?;
    let mut square = [0u8; 25];
    let mut used = [false; 26];
    used[(b'J' - b'A') as usize] = true; // J shares the I cell
    let mut filled = 0usize;
    let folded = key.bytes().map(|b| if b == b'J' { b'I' } else { b });
    for letter in folded.chain(ALPHABET.iter().copied()) {
        let slot = (letter - b'A') as usize;
        if !used[slot] {
            used[slot] = true;
            square[filled] = letter;
            filled += 1;
        }
    }
    debug_assert_eq!(filled, 25);
    Ok(square)
}

/// Polybius square encryption: each letter becomes its one-based row and
/// column coordinates in the keyed square.
///
/// Plaintext must avoid J (the square folds J into I, so J cannot round-trip).
pub fn polybius_encrypt(plaintext: &str, key: &str) -> Result<String, HarnessError> {
    ensure_uppercase_letters(plaintext, "plaintext")?;
    if plaintext.contains('J') {
        return Err(HarnessError::invalid_input(
            "plaintext must not contain J (folded into I by the square)",
        ));
    }
    let square = polybius_square(key)?;
    let mut out = String::with_capacity(plaintext.len() * 2);
    for letter in plaintext.bytes() {
        let position = square
            .iter()
            .position(|&s| s == letter)
            .ok_or_else(|| HarnessError::invalid_input("letter missing from square"))?;
        let row = position / 5 + 1;
        let col = position % 5 + 1;
        out.push(char::from_digit(row as u32, 10).unwrap_or('0'));
        out.push(char::from_digit(col as u32, 10).unwrap_or('0'));
    }
    Ok(out)
}

/// Inverse of [`polybius_encrypt`]: consume row/column digit pairs.
pub fn polybius_decrypt(ciphertext: &str, key: &str) -> Result<String, HarnessError> {
    let square = polybius_square(key)?;
    let digits: Vec<u32> = ciphertext
        .chars()
        .map(|c| {
            c.to_digit(10)
                .filter(|&d| (1..=5).contains(&d))
                .ok_or_else(|| {
                    HarnessError::invalid_input(format!("ciphertext digit out of range: {c:?}"))
                })
        })
        .collect::<Result<_, _>>()?;
    if digits.len() % 2 != 0 {
        return Err(HarnessError::invalid_input(
            "ciphertext must contain an even number of digits",
        ));
    }
    let mut out = String::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let index = (pair[0] as usize - 1) * 5 + (pair[1] as usize - 1);
        out.push(square[index] as char);
    }
    Ok(out)
}

/// Autokey (Vigenere autokey) encryption: the keystream is the key followed
/// by the plaintext itself, so the key never repeats.
pub fn autokey_encrypt(plaintext: &str, key: &str) -> Result<String, HarnessError> {
    ensure_uppercase_letters(plaintext, "plaintext")?;
    ensure_uppercase_letters(key, "key")?;
    if key.is_empty() {
        return Err(HarnessError::invalid_input("key must be non-empty"));
    }
    let plain = plaintext.as_bytes();
    let keystream = key.bytes().chain(plain.iter().copied());
    let out: String = plain
        .iter()
        .zip(keystream)
        .map(|(&p, k)| {
            let shifted = ((p - b'A') + (k - b'A')) % 26;
            (b'A' + shifted) as char
        })
        .collect();
    Ok(out)
}

/// Inverse of [`autokey_encrypt`]: each recovered plaintext letter extends
/// the keystream used for the letters after it.
pub fn autokey_decrypt(ciphertext: &str, key: &str) -> Result<String, HarnessError> {
    ensure_uppercase_letters(ciphertext, "ciphertext")?;
    ensure_uppercase_letters(key, "key")?;
    if key.is_empty() {
        return Err(HarnessError::invalid_input("key must be non-empty"));
    }
    let cipher = ciphertext.as_bytes();
    let key = key.as_bytes();
    let mut plain: Vec<u8> = Vec::with_capacity(cipher.len());
    for (i, &c) in cipher.iter().enumerate() {
        let k = if i < key.len() {
            key[i]
        } else {
            plain[i - key.len()]
        };
        let shifted = ((c - b'A') + 26 - (k - b'A')) % 26;
        plain.push(b'A' + shifted);
    }
    Ok(String::from_utf8(plain).unwrap_or_default())
}

pub(crate) fn ensure_luhn_input(digits: &[u32], modulus: u32) -> Result<(), HarnessError> {
    if modulus < 2 {
        return Err(HarnessError::invalid_input(format!(
            "modulus must be at least 2, got {modulus}"
        )));
    }
    if let Some(&bad) = digits.iter().find(|&&d| d >= modulus) {
        return Err(HarnessError::invalid_input(format!(
            "digit {bad} out of range for modulus {modulus}"
        )));
    }
    Ok(())
}

/// Compute the Luhn mod N check digit for a payload. The digit adjacent to
/// the check position is doubled first, alternating leftwards; doubled values
/// are folded back into the alphabet by summing their base-N digits.
pub fn luhn_mod_n_check_digit(payload: &[u32], modulus: u32) -> Result<u32, HarnessError> {
    ensure_luhn_input(payload, modulus)?;
    let modulus = u64::from(modulus);
    let mut sum = 0u64;
    for (distance, &digit) in payload.iter().rev().enumerate() {
        // Double in u64; digits near u32::MAX overflow when doubled in u32.
        let weighted = if distance % 2 == 0 {
            u64::from(digit) * 2
        } else {
            u64::from(digit)
        };
        sum += weighted / modulus + weighted % modulus;
    }
    Ok(((modulus - sum % modulus) % modulus) as u32)
}

/// Validate a full sequence whose final symbol is the check digit.
pub fn luhn_mod_n_validate(sequence: &[u32], modulus: u32) -> Result<bool, HarnessError> {
    ensure_luhn_input(sequence, modulus)?;
    if sequence.is_empty() {
        return Err(HarnessError::invalid_input(
            "sequence must contain at least a check digit",
        ));
    }
    let modulus = u64::from(modulus);
    let mut sum = 0u64;
    for (distance, &digit) in sequence.iter().rev().enumerate() {
        let weighted = if distance % 2 == 1 {
            u64::from(digit) * 2
        } else {
            u64::from(digit)
        };
        sum += weighted / modulus + weighted % modulus;
    }
    Ok(sum % modulus == 0)
}

const MAC_BLOCK_SIZE: usize = 64;
const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// 64-bit mixing hash used as the compression primitive under the MAC:
/// FNV-1a accumulation with a splitmix64 finalizer. Not collision-resistant
/// cryptography; it stands in for the hash the HMAC construction wraps.
fn mix64(data: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in data {
        h ^= u64::from(byte);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h ^= h >> 30;
    h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94d0_49bb_1331_11eb);
    h ^ (h >> 31)
}

/// One-key MAC via the HMAC construction:
/// tag = H((k ^ opad) || H((k ^ ipad) || message)).
///
/// Keys longer than the block size are hashed down first, per HMAC.
pub fn one_key_mac(key: &[u8], message: &[u8]) -> Result<u64, HarnessError> {
    if key.is_empty() {
        return Err(HarnessError::invalid_input("key must be non-empty"));
    }
    let mut block = [0u8; MAC_BLOCK_SIZE];
    if key.len() > MAC_BLOCK_SIZE {
        block[..8].copy_from_slice(&mix64(key).to_be_bytes());
    } else {
        block[..key.len()].copy_from_slice(key);
    }

    let mut inner = Vec::with_capacity(MAC_BLOCK_SIZE + message.len());
    inner.extend(block.iter().map(|&b| b ^ IPAD));
    inner.extend_from_slice(message);
    let inner_hash = mix64(&inner);

    let mut outer = Vec::with_capacity(MAC_BLOCK_SIZE + 8);
    outer.extend(block.iter().map(|&b| b ^ OPAD));
    outer.extend_from_slice(&inner_hash.to_be_bytes());
    Ok(mix64(&outer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polybius_round_trip() {
        let cipher = polybius_encrypt("ATTACKATDAWN", "ZEBRA").unwrap();
        assert_eq!(polybius_decrypt(&cipher, "ZEBRA").unwrap(), "ATTACKATDAWN");
    }

    #[test]
    fn test_polybius_unkeyed_coordinates() {
        // Unkeyed square: A=11, B=12, ..., E=15, F=21.
        assert_eq!(polybius_encrypt("ABF", "").unwrap(), "111221");
    }

    #[test]
    fn test_polybius_rejects_j_and_lowercase() {
        assert!(polybius_encrypt("JAM", "").is_err());
        assert!(polybius_encrypt("jam", "").is_err());
        assert!(polybius_decrypt("1", "").is_err());
        assert!(polybius_decrypt("19", "").is_err());
    }

    #[test]
    fn test_autokey_known_vector() {
        // Classic example: ATTACKATDAWN under key QUEENLY.
        let cipher = autokey_encrypt("ATTACKATDAWN", "QUEENLY").unwrap();
        assert_eq!(cipher, "QNXEPVYTWTWP");
        assert_eq!(
            autokey_decrypt("QNXEPVYTWTWP", "QUEENLY").unwrap(),
            "ATTACKATDAWN"
        );
    }

    #[test]
    fn test_autokey_round_trip_key_shorter_and_longer() {
        for key in ["K", "KILT", "AVERYLONGKEYINDEED"] {
            let cipher = autokey_encrypt("MEETMEATNOON", key).unwrap();
            assert_eq!(autokey_decrypt(&cipher, key).unwrap(), "MEETMEATNOON");
        }
        assert!(autokey_encrypt("HELLO", "").is_err());
    }

    #[test]
    fn test_luhn_mod_ten_classic() {
        // 7992739871 has check digit 3 under classic Luhn.
        let payload = [7, 9, 9, 2, 7, 3, 9, 8, 7, 1];
        assert_eq!(luhn_mod_n_check_digit(&payload, 10).unwrap(), 3);
        let mut full = payload.to_vec();
        full.push(3);
        assert!(luhn_mod_n_validate(&full, 10).unwrap());
    }

    #[test]
    fn test_luhn_detects_single_symbol_error() {
        let payload = [5, 11, 3, 0, 7, 15, 2];
        let modulus = 16;
        let check = luhn_mod_n_check_digit(&payload, modulus).unwrap();
        let mut full = payload.to_vec();
        full.push(check);
        assert!(luhn_mod_n_validate(&full, modulus).unwrap());

        for position in 0..full.len() {
            let mut corrupted = full.clone();
            corrupted[position] = (corrupted[position] + 1) % modulus;
            assert!(
                !luhn_mod_n_validate(&corrupted, modulus).unwrap(),
                "corruption at {position} went undetected"
            );
        }
    }

    #[test]
    fn test_luhn_large_modulus_digits() {
        // Digits above u32::MAX / 2 must survive the doubling step.
        let modulus = 4_000_000_000u32;
        let payload = [3_000_000_000u32, 1, 3_999_999_999];
        let check = luhn_mod_n_check_digit(&payload, modulus).unwrap();
        assert!(check < modulus);
        let mut full = payload.to_vec();
        full.push(check);
        assert!(luhn_mod_n_validate(&full, modulus).unwrap());
    }

    #[test]
    fn test_luhn_rejects_bad_modulus() {
        assert!(luhn_mod_n_check_digit(&[1, 2], 1).is_err());
        assert!(luhn_mod_n_check_digit(&[5], 5).is_err());
        assert!(luhn_mod_n_validate(&[], 10).is_err());
    }

    #[test]
    fn test_mac_determinism_and_key_sensitivity() {
        let tag1 = one_key_mac(b"secret", b"message").unwrap();
        let tag2 = one_key_mac(b"secret", b"message").unwrap();
        assert_eq!(tag1, tag2);

        assert_ne!(tag1, one_key_mac(b"secret2", b"message").unwrap());
        assert_ne!(tag1, one_key_mac(b"secret", b"message2").unwrap());
        assert!(one_key_mac(b"", b"message").is_err());
    }

    #[test]
    fn test_mac_long_key_is_hashed_down() {
        let long_key = vec![0xabu8; 200];
        let tag = one_key_mac(&long_key, b"m").unwrap();
        // Equivalent short key: the hash of the long key.
        let folded = super::mix64(&long_key).to_be_bytes();
        assert_eq!(tag, one_key_mac(&folded, b"m").unwrap());
    }
}
