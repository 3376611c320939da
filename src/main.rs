use std::io::{self, BufRead};

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use vmsim::loader;

/// Resolve 14-bit virtual addresses against a preloaded TLB / page table /
/// cache hierarchy.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the hierarchy record file (tlb/page/cache lines)
    hierarchy: String,

    /// Addresses to resolve, 3 or 4 hex digits each; reads addresses from
    /// stdin line by line when none are given
    addresses: Vec<String>,
}

fn main() -> Result<()> {
    let env = Env::default().filter_or("VMSIM_LOG", "warn");
    env_logger::init_from_env(env);

    let args = Args::parse();
    let memory = loader::load_file(&args.hierarchy)?;

    if args.addresses.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let addr = line.trim();
            if addr.is_empty() {
                continue;
            }
            println!("{}", memory.resolve_address(addr));
        }
    } else {
        for addr in &args.addresses {
            println!("{}", memory.resolve_address(addr));
        }
    }

    Ok(())
}
