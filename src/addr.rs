use std::fmt;

use crate::utils::bits;

/// Total width of a virtual address
pub const ADDR_BITS: u32 = 14;
/// Width of the virtual page offset (bits 0-5)
pub const VPO_BITS: u32 = 6;
/// Width of the TLB set index (bits 6-7)
pub const TLBI_BITS: u32 = 2;
/// Width of the byte offset within a cache line (low bits of the VPO)
pub const CACHE_OFFSET_BITS: u32 = 2;

/// A virtual address decomposed into its translation fields.
///
/// The geometry is fixed: VPO occupies bits 0-5, the TLB index bits 6-7,
/// the TLB tag bits 8-13, and the VPN is the tag and index together
/// (bits 6-13).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddr {
    pub raw: u32,
    pub vpn: u32,
    pub vpo: u32,
    pub tlb_tag: u32,
    pub tlb_idx: u32,
}

impl VirtualAddr {
    /// Decodes a 3- or 4-hex-digit string into a virtual address.
    ///
    /// A 3-digit address carries an implicit leading zero. Any other
    /// length, or any non-hex character, is an `InvalidAddress`. Bits
    /// above 13 of a 4-digit address are ignored.
    pub fn decode(hex: &str) -> Result<Self, InvalidAddress> {
        if hex.len() != 3 && hex.len() != 4 {
            return Err(InvalidAddress::new(hex));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidAddress::new(hex));
        }

        let mut raw = 0;
        for c in hex.chars() {
            // chars are pre-checked, to_digit can't fail here
            let nibble = c.to_digit(16).ok_or_else(|| InvalidAddress::new(hex))?;
            raw = (raw << 4) | nibble;
        }
        let raw = raw & bits::mask(ADDR_BITS);

        let (vpn, vpo) = bits::split_at(raw, VPO_BITS);
        let (tlb_tag, tlb_idx) = bits::split_at(vpn, TLBI_BITS);
        Ok(VirtualAddr {
            raw,
            vpn,
            vpo,
            tlb_tag,
            tlb_idx,
        })
    }

    /// Cache set index: the high 4 bits of the page offset
    pub fn cache_idx(&self) -> u32 {
        bits::split_at(self.vpo, CACHE_OFFSET_BITS).0
    }

    /// Byte offset within a cache line: the low 2 bits of the page offset
    pub fn cache_offset(&self) -> u32 {
        bits::split_at(self.vpo, CACHE_OFFSET_BITS).1
    }
}

impl fmt::Display for VirtualAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "va {:04x}: vpn={:x} vpo={:x} tlb_tag={:x} tlb_idx={:x}",
            self.raw, self.vpn, self.vpo, self.tlb_tag, self.tlb_idx
        )
    }
}

/// A malformed address string: wrong length or a non-hex character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAddress(String);

impl InvalidAddress {
    fn new(addr: &str) -> Self {
        InvalidAddress(addr.to_owned())
    }
}

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid virtual address '{}'", self.0)
    }
}

impl std::error::Error for InvalidAddress {}
