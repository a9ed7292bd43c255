use std::{path::Path, sync::Arc};

use anyhow::Context;
use memtap::{host::Physical, Drbg, Sampler, SamplerConfig};
use serde::Serialize;

use crate::{app::GlobalOptions, output::format_hex};

#[derive(Debug, Serialize)]
struct SampleOutput {
    length: usize,
    bytes: String,
    symbols: usize,
    algorithm: String,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    path: &Path,
    length: usize,
    algorithm: &str,
    seed: Option<&str>,
    stride: usize,
    base: u64,
    population: Option<u64>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let host = Arc::new(
        Physical::new(path, base, stride)
            .with_context(|| format!("failed to map image: {}", path.display()))?,
    );

    let mut entropy =
        Drbg::open_named(algorithm).with_context(|| format!("bad algorithm '{algorithm}'"))?;
    entropy
        .reseed(seed.map_or(&[] as &[u8], str::as_bytes))
        .context("failed to seed the generator")?;

    let symbols = host.symbol_count();
    let config = SamplerConfig {
        population_hint: population.unwrap_or(symbols as u64),
        page_size: stride as u64,
        ..SamplerConfig::default()
    };

    let sampler = Sampler::with_config(Box::new(entropy), host.clone(), host, config)
        .context("invalid sampler tuning")?;

    let bytes = sampler
        .sample(length)
        .context("sampling session failed")?;

    let data = SampleOutput {
        length: bytes.len(),
        bytes: format_hex(&bytes),
        symbols,
        algorithm: algorithm.to_string(),
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!("{}", data.bytes);
        log::info!(
            "{} bytes from {} symbols via {}",
            data.length,
            data.symbols,
            data.algorithm
        );
    }

    Ok(())
}
