use std::path::Path;

use anyhow::Context;
use memtap::host::{IterFlow, Physical, SymbolSource};
use serde::Serialize;

use crate::{app::GlobalOptions, output::symbol_table};

#[derive(Debug, Serialize)]
struct SymbolRow {
    name: String,
    address: String,
}

#[derive(Debug, Serialize)]
struct SymbolsOutput {
    total: usize,
    shown: usize,
    symbols: Vec<SymbolRow>,
}

pub fn run(
    path: &Path,
    stride: usize,
    base: u64,
    limit: usize,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let host = Physical::new(path, base, stride)
        .with_context(|| format!("failed to map image: {}", path.display()))?;

    let mut symbols = Vec::new();
    host.for_each_symbol(&mut |entry| {
        if symbols.len() >= limit {
            return Ok(IterFlow::Stop);
        }
        symbols.push(SymbolRow {
            name: entry.name.to_string(),
            address: format!("0x{:08x}", entry.address),
        });
        Ok(IterFlow::Continue)
    })?;

    let data = SymbolsOutput {
        total: host.symbol_count(),
        shown: symbols.len(),
        symbols,
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        let rows = data
            .symbols
            .iter()
            .map(|row| (row.name.as_str(), row.address.as_str()));
        println!("{}", symbol_table(rows));
        println!("{} of {} symbols", data.shown, data.total);
    }

    Ok(())
}
