use std::fmt;

/// Bytes held by one cache line, addressed by the 2-bit cache offset
pub const LINE_BYTES: usize = 4;

/// One loaded cache line. The tag is a physical page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLine {
    pub idx: u32,
    pub tag: u32,
    pub bytes: [u32; LINE_BYTES],
}

/// The loaded cache, scanned in load order; the first (idx, tag) match
/// supplies the line.
#[derive(Debug, Default)]
pub struct Cache {
    lines: Vec<CacheLine>,
}

impl Cache {
    pub fn new(lines: Vec<CacheLine>) -> Self {
        Cache { lines }
    }

    /// Probes for a line keyed by (idx, tag) and selects the offset-th
    /// byte of it. `offset` is a decoded 2-bit field, always in range.
    pub fn lookup(&self, idx: u32, tag: u32, offset: u32) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.idx == idx && line.tag == tag)
            .map(|line| line.bytes[offset as usize])
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache:")?;
        for line in &self.lines {
            writeln!(
                f,
                "\tidx: {:x}\ttag: {:x}\tbytes: {:02x} {:02x} {:02x} {:02x}",
                line.idx, line.tag, line.bytes[0], line.bytes[1], line.bytes[2], line.bytes[3]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Cache, CacheLine};

    #[test]
    fn selects_offset_byte() {
        let cache = Cache::new(vec![CacheLine {
            idx: 2,
            tag: 7,
            bytes: [0x10, 0x20, 0x30, 0x40],
        }]);
        assert_eq!(cache.lookup(2, 7, 2), Some(0x30));
        assert_eq!(cache.lookup(2, 7, 0), Some(0x10));
    }

    #[test]
    fn tag_and_index_must_match() {
        let cache = Cache::new(vec![CacheLine {
            idx: 2,
            tag: 7,
            bytes: [0x10, 0x20, 0x30, 0x40],
        }]);
        assert_eq!(cache.lookup(2, 8, 0), None);
        assert_eq!(cache.lookup(3, 7, 0), None);
    }

    #[test]
    fn first_match_wins() {
        let cache = Cache::new(vec![
            CacheLine { idx: 1, tag: 1, bytes: [1, 2, 3, 4] },
            CacheLine { idx: 1, tag: 1, bytes: [5, 6, 7, 8] },
        ]);
        assert_eq!(cache.lookup(1, 1, 3), Some(4));
    }
}
