//! CLI argument parsing.

pub mod prune;

use clap::Parser;

/// tagsweep - keep the newest matching image versions and delete the rest
#[derive(Parser, Debug)]
#[command(name = "tagsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub prune: prune::PruneArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
