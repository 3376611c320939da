use std::fmt;

/// One loaded page table record: a vpn-to-ppn translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry {
    pub vpn: u32,
    pub ppn: u32,
}

/// The loaded page table, scanned in load order when the TLB misses.
#[derive(Debug, Default)]
pub struct PageTable {
    entries: Vec<PageEntry>,
}

impl PageTable {
    pub fn new(entries: Vec<PageEntry>) -> Self {
        PageTable { entries }
    }

    /// Walks the table for the first entry translating `vpn`.
    pub fn lookup(&self, vpn: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.vpn == vpn)
            .map(|e| e.ppn)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for PageTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page table:")?;
        for e in &self.entries {
            writeln!(f, "\tvpn: {:x}\tppn: {:x}", e.vpn, e.ppn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{PageEntry, PageTable};

    #[test]
    fn translates_vpn() {
        let pt = PageTable::new(vec![PageEntry { vpn: 3, ppn: 7 }]);
        assert_eq!(pt.lookup(3), Some(7));
        assert_eq!(pt.lookup(4), None);
    }

    #[test]
    fn first_match_wins() {
        let pt = PageTable::new(vec![
            PageEntry { vpn: 3, ppn: 7 },
            PageEntry { vpn: 3, ppn: 1 },
        ]);
        assert_eq!(pt.lookup(3), Some(7));
    }
}
