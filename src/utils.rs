/// Helper functions for bit operations
pub mod bits {
    /// Mask covering the low `n` bits
    pub const fn mask(n: u32) -> u32 {
        (1 << n) - 1
    }

    /// Splits a u32 into (high, low) halves at the bit index
    pub fn split_at(x: u32, n: u32) -> (u32, u32) {
        let low = x & mask(n);
        let high = (x & !mask(n)) >> n;
        (high, low)
    }

}
