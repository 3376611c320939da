use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::warn;

use crate::memory::{Cache, CacheLine, Memory, PageEntry, PageTable, Tlb, TlbEntry};

/// Reads a hierarchy record file and builds the loaded `Memory`.
///
/// The stream is line oriented, `kind:payload`, with whitespace-separated
/// non-negative decimal fields in the payload:
///
/// ```text
/// tlb:INDEX TAG PPN
/// page:VPN PPN
/// cache:INDEX TAG B0 B1 B2 B3
/// ```
///
/// Blank lines, `#` comments and lines without a `:` are skipped. Record
/// order within each kind is the scan order used by lookups.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Memory> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("opening hierarchy file {}", path.display()))?;
    load(BufReader::new(file))
}

/// Builds the loaded `Memory` from any record stream.
pub fn load<R: BufRead>(reader: R) -> Result<Memory> {
    let mut tlb = Vec::new();
    let mut pages = Vec::new();
    let mut lines = Vec::new();

    for line in reader.lines() {
        let line = line.context("reading hierarchy records")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(sep) = line.find(':') else {
            continue;
        };

        let (kind, payload) = line.split_at(sep);
        let fields = parse_fields(&payload[1..])
            .with_context(|| format!("in record '{line}'"))?;

        match kind.trim() {
            "tlb" => match fields[..] {
                [idx, tag, ppn] => tlb.push(TlbEntry { idx, tag, ppn }),
                _ => bail!("tlb record wants 3 fields, got {}: '{line}'", fields.len()),
            },
            "page" => match fields[..] {
                [vpn, ppn] => pages.push(PageEntry { vpn, ppn }),
                _ => bail!("page record wants 2 fields, got {}: '{line}'", fields.len()),
            },
            "cache" => match fields[..] {
                [idx, tag, b0, b1, b2, b3] => lines.push(CacheLine {
                    idx,
                    tag,
                    bytes: [b0, b1, b2, b3],
                }),
                _ => bail!("cache record wants 6 fields, got {}: '{line}'", fields.len()),
            },
            other => warn!("skipping unrecognized record kind '{other}'"),
        }
    }

    Ok(Memory::new(
        Tlb::new(tlb),
        PageTable::new(pages),
        Cache::new(lines),
    ))
}

fn parse_fields(payload: &str) -> Result<Vec<u32>> {
    payload
        .split_whitespace()
        .map(|tok| {
            tok.parse::<u32>()
                .with_context(|| format!("bad record field '{tok}'"))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::load;
    use crate::memory::Resolution;

    const RECORDS: &str = "\
# sample hierarchy
tlb:1 2 9

page:3 7
cache:3 9 1 2 3 4
cache:2 7 16 32 48 64
";

    #[test]
    fn loads_all_three_kinds() {
        let memory = load(RECORDS.as_bytes()).unwrap();
        // 0x24d probes tlb (1, 2) then cache (3, 9) offset 1
        assert_eq!(memory.resolve_address("24d"), Resolution::Byte(2));
    }

    #[test]
    fn page_records_translate() {
        // 0x0c8: vpn 3, vpo 0x08 -> cache idx 2, offset 0; page maps 3 -> 7
        let memory = load(RECORDS.as_bytes()).unwrap();
        assert_eq!(memory.resolve_address("0c8"), Resolution::Byte(16));
    }

    #[test]
    fn unknown_kinds_are_skipped() {
        let memory = load("bogus:1 2 3\ntlb:0 0 5\n".as_bytes()).unwrap();
        assert_eq!(memory.resolve_address("000"), Resolution::Undetermined);
    }

    #[test]
    fn wrong_arity_fails() {
        assert!(load("tlb:1 2\n".as_bytes()).is_err());
        assert!(load("page:1\n".as_bytes()).is_err());
        assert!(load("cache:1 2 3\n".as_bytes()).is_err());
    }

    #[test]
    fn bad_field_fails() {
        assert!(load("tlb:1 x 9\n".as_bytes()).is_err());
        assert!(load("page:-1 2\n".as_bytes()).is_err());
    }

    #[test]
    fn empty_stream_loads() {
        let memory = load("".as_bytes()).unwrap();
        assert_eq!(memory.resolve_address("24d"), Resolution::Undetermined);
    }
}
