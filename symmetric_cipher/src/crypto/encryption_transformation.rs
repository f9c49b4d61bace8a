pub trait EncryptionTransformation {
    /// Round function: maps one half-block and a round key to a half-block.
    fn transform(&self, input_block: &[u8], round_key: &[u8]) -> Vec<u8>;
}
