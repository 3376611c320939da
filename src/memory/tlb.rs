use std::fmt;

/// One loaded TLB record: a (set index, tag) key mapped to a physical page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub idx: u32,
    pub tag: u32,
    pub ppn: u32,
}

/// The loaded TLB.
///
/// Entries keep their load order and are never touched afterwards; a probe
/// scans front to back and the first (idx, tag) match wins, so duplicate
/// keys resolve deterministically.
#[derive(Debug, Default)]
pub struct Tlb {
    entries: Vec<TlbEntry>,
}

impl Tlb {
    pub fn new(entries: Vec<TlbEntry>) -> Self {
        Tlb { entries }
    }

    /// Probes the TLB for a fast translation of (idx, tag).
    pub fn lookup(&self, idx: u32, tag: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.idx == idx && e.tag == tag)
            .map(|e| e.ppn)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Tlb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TLB:")?;
        for e in &self.entries {
            writeln!(f, "\tidx: {:x}\ttag: {:x}\tppn: {:x}", e.idx, e.tag, e.ppn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Tlb, TlbEntry};

    #[test]
    fn first_match_wins() {
        let tlb = Tlb::new(vec![
            TlbEntry { idx: 1, tag: 2, ppn: 9 },
            TlbEntry { idx: 1, tag: 2, ppn: 4 },
        ]);
        assert_eq!(tlb.lookup(1, 2), Some(9));
    }

    #[test]
    fn both_fields_must_match() {
        let tlb = Tlb::new(vec![TlbEntry { idx: 0, tag: 0, ppn: 5 }]);
        assert_eq!(tlb.lookup(0, 0), Some(5));
        assert_eq!(tlb.lookup(0, 1), None);
        assert_eq!(tlb.lookup(1, 0), None);
    }

    #[test]
    fn empty_misses() {
        let tlb = Tlb::default();
        assert_eq!(tlb.lookup(0, 0), None);
    }
}
