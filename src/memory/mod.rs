mod cache;
mod page;
mod tlb;

pub use cache::{Cache, CacheLine, LINE_BYTES};
pub use page::{PageEntry, PageTable};
pub use tlb::{Tlb, TlbEntry};

use std::fmt;

use log::debug;

use crate::addr::VirtualAddr;

/// The loaded three-level hierarchy: TLB, page table, cache.
///
/// Populated once by the loader and read-only afterwards; every resolution
/// is a pure query against it.
pub struct Memory {
    tlb: Tlb,
    pt: PageTable,
    cache: Cache,
}

impl Memory {
    pub fn new(tlb: Tlb, pt: PageTable, cache: Cache) -> Self {
        Memory { tlb, pt, cache }
    }

    /// Translates a decoded address to a physical page number.
    ///
    /// The TLB is probed first; on a miss the page table is walked by VPN.
    /// A miss in both is an ordinary outcome, not an error.
    pub fn resolve_physical_page(&self, addr: &VirtualAddr) -> Option<u32> {
        if let Some(ppn) = self.tlb.lookup(addr.tlb_idx, addr.tlb_tag) {
            debug!(
                "tlb hit: idx={:x} tag={:x} -> ppn={:x}",
                addr.tlb_idx, addr.tlb_tag, ppn
            );
            return Some(ppn);
        }
        debug!(
            "tlb miss: idx={:x} tag={:x}, walking page table",
            addr.tlb_idx, addr.tlb_tag
        );

        let ppn = self.pt.lookup(addr.vpn);
        match ppn {
            Some(ppn) => debug!("page table hit: vpn={:x} -> ppn={:x}", addr.vpn, ppn),
            None => debug!("page table miss: vpn={:x}", addr.vpn),
        }
        ppn
    }

    /// Resolves one hex address string to the byte stored at it.
    ///
    /// Decode, translate, then probe the cache with the physical page
    /// number as the line tag. Malformed input and misses at either level
    /// all collapse into `Resolution::Undetermined`.
    pub fn resolve_address(&self, hex: &str) -> Resolution {
        let addr = match VirtualAddr::decode(hex) {
            Ok(addr) => addr,
            Err(e) => {
                debug!("{e}");
                return Resolution::Undetermined;
            }
        };
        debug!("{addr}");

        let ppn = match self.resolve_physical_page(&addr) {
            Some(ppn) => ppn,
            None => return Resolution::Undetermined,
        };

        match self.cache.lookup(addr.cache_idx(), ppn, addr.cache_offset()) {
            Some(byte) => {
                debug!(
                    "cache hit: idx={:x} tag={:x} offset={:x} -> {:#x}",
                    addr.cache_idx(),
                    ppn,
                    addr.cache_offset(),
                    byte
                );
                Resolution::Byte(byte)
            }
            None => {
                debug!("cache miss: idx={:x} tag={:x}", addr.cache_idx(), ppn);
                Resolution::Undetermined
            }
        }
    }
}

/// Outcome of one address resolution.
///
/// The caller only ever sees resolved-or-not; the miss reason is folded
/// away on purpose and surfaces only in the debug log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Byte(u32),
    Undetermined,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Byte(b) => write!(f, "{:#X}", b),
            Resolution::Undetermined => write!(f, "Cannot be determined."),
        }
    }
}
