use anyhow::bail;
use clap::{Parser, ValueEnum};
use seedpool::{DEFAULT_MAX_GENERATE_ROUNDS, StoreConfig};

/// Which [`seedpool::RandSource`] backs the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RandomSourceKind {
    /// Thread-local ChaCha RNG, reseeded from the OS.
    Thread,
    /// Operating system entropy for every seed.
    Os,
}

/// Runtime configuration for the `seedpool-demo` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is honoured).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "seedpool-demo",
    version,
    about = "Generate a pool of seeds, borrow a few and issue identifiers from them"
)]
pub struct CliArgs {
    /// Number of seeds to generate into the store.
    ///
    /// Environment variable: `SEED_COUNT`
    #[arg(long, env = "SEED_COUNT", default_value_t = 16)]
    pub seed_count: usize,

    /// Number of seeds to borrow from the store.
    ///
    /// Must not exceed `SEED_COUNT`.
    ///
    /// Environment variable: `BORROW_COUNT`
    #[arg(long, env = "BORROW_COUNT", default_value_t = 2)]
    pub borrow_count: usize,

    /// Number of identifiers to issue from each borrowed seed.
    ///
    /// Environment variable: `IDS_PER_SEED`
    #[arg(long, env = "IDS_PER_SEED", default_value_t = 2)]
    pub ids_per_seed: usize,

    /// Nanosecond timestamp at which seed fingerprints are derived.
    ///
    /// Environment variable: `REFERENCE_TIMESTAMP`
    #[arg(long, env = "REFERENCE_TIMESTAMP", default_value_t = 0)]
    pub reference_timestamp: u64,

    /// Maximum generation rounds before giving up on duplicate seeds.
    ///
    /// Environment variable: `MAX_GENERATE_ROUNDS`
    #[arg(long, env = "MAX_GENERATE_ROUNDS", default_value_t = DEFAULT_MAX_GENERATE_ROUNDS)]
    pub max_generate_rounds: usize,

    /// Source of seed randomness.
    ///
    /// Environment variable: `RANDOM_SOURCE`
    #[arg(long, env = "RANDOM_SOURCE", value_enum, default_value_t = RandomSourceKind::Thread)]
    pub random_source: RandomSourceKind,
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub seed_count: usize,
    pub borrow_count: usize,
    pub ids_per_seed: usize,
    pub random_source: RandomSourceKind,
    pub store: StoreConfig,
}

impl TryFrom<CliArgs> for DemoConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.seed_count == 0 {
            bail!("SEED_COUNT must be greater than 0");
        }

        if args.borrow_count > args.seed_count {
            bail!(
                "BORROW_COUNT ({}) exceeds SEED_COUNT ({})",
                args.borrow_count,
                args.seed_count
            );
        }

        if args.max_generate_rounds == 0 {
            bail!("MAX_GENERATE_ROUNDS must be greater than 0");
        }

        let store = StoreConfig::default()
            .with_reference_timestamp(args.reference_timestamp)
            .with_max_generate_rounds(args.max_generate_rounds);

        Ok(Self {
            seed_count: args.seed_count,
            borrow_count: args.borrow_count,
            ids_per_seed: args.ids_per_seed,
            random_source: args.random_source,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<DemoConfig> {
        let argv = std::iter::once("seedpool-demo").chain(args.iter().copied());
        DemoConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn defaults_are_valid() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.seed_count, 16);
        assert_eq!(config.borrow_count, 2);
        assert_eq!(config.random_source, RandomSourceKind::Thread);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn overrides_flow_into_store_config() {
        let config = parse(&[
            "--reference-timestamp",
            "42",
            "--max-generate-rounds",
            "3",
            "--random-source",
            "os",
        ])
        .unwrap();
        assert_eq!(config.store.reference_timestamp, 42);
        assert_eq!(config.store.max_generate_rounds, 3);
        assert_eq!(config.random_source, RandomSourceKind::Os);
    }

    #[test]
    fn rejects_borrowing_more_than_generated() {
        let err = parse(&["--seed-count", "2", "--borrow-count", "3"]).unwrap_err();
        assert!(err.to_string().contains("BORROW_COUNT"));
    }

    #[test]
    fn rejects_zero_seeds() {
        assert!(parse(&["--seed-count", "0", "--borrow-count", "0"]).is_err());
    }
}
