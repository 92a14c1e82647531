mod config;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::{CliArgs, DemoConfig, RandomSourceKind};
use seedpool::{OsRandom, RandSource, SeedStore, SystemClock, ThreadRandom};
use tracing::info;
use uuid::Uuid;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = DemoConfig::try_from(args)?;

    telemetry::init_telemetry()?;

    match config.random_source {
        RandomSourceKind::Thread => run(&config, ThreadRandom),
        RandomSourceKind::Os => run(&config, OsRandom),
    }
}

fn run<R: RandSource>(config: &DemoConfig, rng: R) -> anyhow::Result<()> {
    let store = SeedStore::with_config(config.store, SystemClock, rng);
    store.log_snapshot();

    store
        .generate_seeds(config.seed_count)
        .context("failed to fill the seed store")?;
    store.log_snapshot();

    let seeds = store.borrow_seeds(config.borrow_count);
    info!(borrowed = seeds.len(), "borrowed seeds");

    for seed in &seeds {
        let seed_uuid = Uuid::from_bytes(seed.bytes());
        for _ in 0..config.ids_per_seed {
            let id = Uuid::from_bytes(seed.next_id());
            info!(
                seed = %seed_uuid,
                id = %id,
                version = id.get_version_num(),
                "issued identifier"
            );
        }
    }
    store.log_snapshot();

    let rejected = store.return_seeds(seeds);
    info!(rejected = rejected.len(), "returned borrowed seeds");
    store.log_snapshot();

    Ok(())
}
