use hex_literal::hex;
use rijndael::rijndael::cipher::{Rijndael, aes_decrypt_block, aes_encrypt_block};
use rijndael::rijndael::key_schedule::{expand_key, rounds_for_key};
use symmetric_cipher::{CipherAlgorithm, CipherError};

const FIPS_PLAINTEXT: [u8; 16] = hex!("00112233445566778899aabbccddeeff");

#[test]
fn test_aes128_fips_appendix_b() {
    let key = hex!("2b7e151628aed2a6abf7158809cf4f3c");
    let plaintext = hex!("3243f6a8885a308d313198a2e0370734");
    let expected = hex!("3925841d02dc09fbdc118597196a0b32");

    let round_keys = expand_key(&key);
    let ciphertext = aes_encrypt_block(&plaintext, &round_keys);
    assert_eq!(ciphertext, expected, "AES-128 encryption mismatch");
    assert_eq!(aes_decrypt_block(&ciphertext, &round_keys), plaintext);
}

#[test]
fn test_aes128_fips_appendix_c1() {
    let cipher = Rijndael::with_key(&hex!("000102030405060708090a0b0c0d0e0f")).unwrap();
    let ciphertext = cipher.encrypt(&FIPS_PLAINTEXT);
    assert_eq!(ciphertext, hex!("69c4e0d86a7b0430d8cdb78070b4c55a"));
    assert_eq!(cipher.decrypt(&ciphertext), FIPS_PLAINTEXT);
    assert_eq!(cipher.rounds(), 10);
}

#[test]
fn test_aes192_fips_appendix_c2() {
    let cipher = Rijndael::with_key(&hex!("000102030405060708090a0b0c0d0e0f1011121314151617")).unwrap();
    let ciphertext = cipher.encrypt(&FIPS_PLAINTEXT);
    assert_eq!(ciphertext, hex!("dda97ca4864cdfe06eaf70a0ec0d7191"));
    assert_eq!(cipher.decrypt(&ciphertext), FIPS_PLAINTEXT);
    assert_eq!(cipher.rounds(), 12);
}

#[test]
fn test_aes256_fips_appendix_c3() {
    let cipher = Rijndael::with_key(&hex!(
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"
    ))
    .unwrap();
    let ciphertext = cipher.encrypt(&FIPS_PLAINTEXT);
    assert_eq!(ciphertext, hex!("8ea2b7ca516745bfeafc49904b496089"));
    assert_eq!(cipher.decrypt(&ciphertext), FIPS_PLAINTEXT);
    assert_eq!(cipher.rounds(), 14);
}

#[test]
fn test_key_schedule_lengths() {
    assert_eq!(expand_key(&[0u8; 16]).len(), 11);
    assert_eq!(expand_key(&[0u8; 24]).len(), 13);
    assert_eq!(expand_key(&[0u8; 32]).len(), 15);
}

#[test]
fn test_aes128_schedule_matches_fips_appendix_a1() {
    let key = hex!("2b7e151628aed2a6abf7158809cf4f3c");
    let schedule = expand_key(&key);

    assert_eq!(schedule[0].as_slice(), &key);
    assert_eq!(schedule[1].as_slice(), &hex!("a0fafe1788542cb123a339392a6c7605"));
    assert_eq!(schedule[10].as_slice(), &hex!("d014f9a8c9ee2589e13f0cc8b6630ca6"));
}

#[test]
fn test_rejects_unsupported_key_lengths() {
    for len in [0usize, 8, 15, 17, 31, 33] {
        assert_eq!(rounds_for_key(len), None);
        let result = Rijndael::with_key(&vec![0u8; len]);
        assert!(matches!(
            result,
            Err(CipherError::InvalidKeyLength { algorithm: "AES", actual, .. }) if actual == len
        ));
    }
}
