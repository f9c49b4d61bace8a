pub trait KeyExpansion {
    /// Derives the per-round subkeys. Callers validate the key length first.
    fn generate_round_keys(&self, key: &[u8]) -> Vec<Vec<u8>>;
}
