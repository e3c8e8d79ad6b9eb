//! CLI error types.

use std::path::PathBuf;

use treedoc_config::ConfigError;
use treedoc_site::GenerateError;
use treedoc_tree::TreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid element tree: {0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Generate(#[from] GenerateError),
}
