use clap::{ArgAction, Parser, Subcommand};

/// CLI arguments for globeway
#[derive(Debug, Parser)]
#[command(
    name = "globeway",
    version,
    about = "Browse countries merged from two public directories, with economic indicators"
)]
pub struct CliArgs {
    /// Path to a TOML settings file (missing keys keep their defaults)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Display language: en or pt (overrides the settings file)
    #[arg(short = 'l', long = "lang", global = true)]
    pub lang: Option<String>,

    /// Keep countries only the secondary directory knows
    #[arg(long = "union", global = true)]
    pub union: bool,

    /// Print JSON instead of text
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the merged catalog
    Stats,

    /// List countries, sorted by name
    Countries {
        /// Only this region (e.g. Europe)
        #[arg(long)]
        region: Option<String>,

        /// Only countries with at most this population
        #[arg(long = "max-population")]
        max_population: Option<u64>,

        /// Only countries using this top-level domain (e.g. .br)
        #[arg(long)]
        tld: Option<String>,
    },

    /// Show one country by name or ISO code
    Country {
        /// Name (e.g. Brazil) or ISO2/ISO3 code (e.g. BR, BRA)
        query: String,

        /// Also fetch economic indicators
        #[arg(short = 'e', long = "economy")]
        economy: bool,
    },

    /// Suggest country names for a partial input
    Suggest {
        /// Partial name (case-insensitive)
        term: String,
    },

    /// Economic indicators for one country
    Economy {
        /// ISO2 or ISO3 code
        code: String,
    },

    /// Economic indicators for the most populous countries
    Bulk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_work_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["globeway", "country", "brazil", "-e", "--lang", "pt", "-vv"])
                .unwrap();
        assert_eq!(args.lang.as_deref(), Some("pt"));
        assert_eq!(args.verbose, 2);
        match args.command {
            Commands::Country { query, economy } => {
                assert_eq!(query, "brazil");
                assert!(economy);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn countries_filters_parse() {
        let args = CliArgs::try_parse_from([
            "globeway",
            "--union",
            "countries",
            "--region",
            "Europe",
            "--max-population",
            "1000000",
            "--tld",
            ".pt",
        ])
        .unwrap();
        assert!(args.union);
        match args.command {
            Commands::Countries {
                region,
                max_population,
                tld,
            } => {
                assert_eq!(region.as_deref(), Some("Europe"));
                assert_eq!(max_population, Some(1_000_000));
                assert_eq!(tld.as_deref(), Some(".pt"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(CliArgs::try_parse_from(["globeway"]).is_err());
    }
}
