use symmetric_cipher::crypto::des::DES;
use symmetric_cipher::{
    BlockCipher, CipherAlgorithm, CipherContext, CipherError, CipherMode, CryptMode, PaddingMode,
    SymmetricCipher,
};

struct IdentityCipher;

impl CipherAlgorithm for IdentityCipher {
    fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        data.to_vec()
    }
    fn decrypt(&self, data: &[u8]) -> Vec<u8> {
        data.to_vec()
    }
}

impl SymmetricCipher for IdentityCipher {
    fn set_key(&mut self, _: &[u8]) -> Result<(), CipherError> {
        Ok(())
    }
}

impl BlockCipher for IdentityCipher {
    fn block_size(&self) -> usize {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_context(mode: CipherMode, padding: PaddingMode, iv: Option<Vec<u8>>) -> CipherContext {
        CipherContext::new(Box::new(IdentityCipher), mode, padding, iv).unwrap()
    }

    #[test]
    fn test_ecb_identity_only_pads() {
        let ctx = identity_context(CipherMode::ECB, PaddingMode::PKCS7, None);
        let encrypted = ctx.crypt(b"abc", CryptMode::Encrypt).unwrap();
        assert_eq!(encrypted, b"abc\x05\x05\x05\x05\x05");

        let decrypted = ctx.crypt(&encrypted, CryptMode::Decrypt).unwrap();
        assert_eq!(decrypted, b"abc");
    }

    #[test]
    fn test_cbc_identity_chains_previous_block() {
        let iv = vec![0xFF; 8];
        let ctx = identity_context(CipherMode::CBC, PaddingMode::Zeros, Some(iv));
        let plaintext = [0x0F; 16];

        let encrypted = ctx.crypt(&plaintext, CryptMode::Encrypt).unwrap();
        assert_eq!(&encrypted[..8], &[0xF0; 8]);
        assert_eq!(&encrypted[8..], &[0xFF; 8]);

        let decrypted = ctx.crypt(&encrypted, CryptMode::Decrypt).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_cbc_requires_iv() {
        let result = CipherContext::new(Box::new(IdentityCipher), CipherMode::CBC, PaddingMode::PKCS7, None);
        assert!(matches!(result, Err(CipherError::MissingIv)));
    }

    #[test]
    fn test_iv_length_must_match_block() {
        let result = CipherContext::new(
            Box::new(IdentityCipher),
            CipherMode::CBC,
            PaddingMode::PKCS7,
            Some(vec![0; 16]),
        );
        assert!(matches!(
            result,
            Err(CipherError::InvalidIvLength { expected: 8, actual: 16 })
        ));
    }

    #[test]
    fn test_output_len() {
        let ctx = identity_context(CipherMode::ECB, PaddingMode::PKCS7, None);
        assert_eq!(ctx.output_len(0, CryptMode::Encrypt), 8);
        assert_eq!(ctx.output_len(8, CryptMode::Encrypt), 16);
        assert_eq!(ctx.output_len(24, CryptMode::Decrypt), 24);
    }

    #[test]
    fn test_crypt_into_reports_written_length() {
        let ctx = identity_context(CipherMode::ECB, PaddingMode::PKCS7, None);
        let mut out = vec![0u8; ctx.output_len(10, CryptMode::Encrypt)];
        let written = ctx.crypt_into(b"0123456789", CryptMode::Encrypt, &mut out).unwrap();
        assert_eq!(written, 16);

        let mut plain = vec![0u8; ctx.output_len(written, CryptMode::Decrypt)];
        let written = ctx.crypt_into(&out, CryptMode::Decrypt, &mut plain).unwrap();
        assert_eq!(&plain[..written], b"0123456789");
    }

    #[test]
    fn test_crypt_into_rejects_short_output() {
        let ctx = identity_context(CipherMode::ECB, PaddingMode::PKCS7, None);
        let mut out = [0u8; 8];
        let result = ctx.crypt_into(b"12345678", CryptMode::Encrypt, &mut out);
        assert!(matches!(
            result,
            Err(CipherError::OutputTooSmall { required: 16, actual: 8 })
        ));
    }

    #[test]
    fn test_des_cbc_roundtrip() {
        let des = DES::with_key(b"12345678").unwrap();
        let ctx = CipherContext::new(Box::new(des), CipherMode::CBC, PaddingMode::PKCS7, Some(vec![7; 8])).unwrap();

        let plaintext = b"Hello, world!\n";
        let encrypted = ctx.crypt(plaintext, CryptMode::Encrypt).unwrap();
        assert_eq!(encrypted.len(), 16);
        assert_eq!(ctx.crypt(&encrypted, CryptMode::Decrypt).unwrap(), plaintext);
    }

    #[test]
    fn test_context_shared_across_threads() {
        let ctx = std::sync::Arc::new(
            CipherContext::new(Box::new(DES::with_key(b"12345678").unwrap()), CipherMode::ECB, PaddingMode::PKCS7, None)
                .unwrap(),
        );

        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let ctx = ctx.clone();
                std::thread::spawn(move || {
                    let message = vec![i; 37];
                    let encrypted = ctx.crypt(&message, CryptMode::Encrypt).unwrap();
                    ctx.crypt(&encrypted, CryptMode::Decrypt).unwrap() == message
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
