// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line arguments.

use clap::{Parser, ValueEnum};
use matwire_texture::Projection;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "matwire",
    author,
    version,
    about = "Classify texture files by name and wire them into a Redshift material graph"
)]
pub struct Cli {
    /// Texture files or directories to scan recursively
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<PathBuf>,

    /// RON configuration file (keyword table, projection, UV transform)
    #[arg(long, value_name = "FILE", env = "MATWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Existing RON graph to re-wire; a fresh material graph is used otherwise
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Where to write the resulting graph (defaults to `--graph`, else stdout)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Projection stage inserted for every sampler; overrides the config file
    #[arg(long, value_enum, value_name = "MODE")]
    pub projection: Option<ProjectionArg>,

    /// Only print the channel each file classifies to
    #[arg(long)]
    pub classify_only: bool,

    /// Name of the material when a fresh graph is created
    #[arg(long, value_name = "NAME", default_value = "Material")]
    pub material_name: String,
}

/// `--projection` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectionArg {
    /// Pass mesh UVs through a UV context projection
    UvPassthrough,
    /// Read an explicit UV channel
    UvChannel,
    /// Triplanar node between sampler and material
    Triplanar,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::UvPassthrough => Self::UvPassthrough,
            ProjectionArg::UvChannel => Self::UvChannel,
            ProjectionArg::Triplanar => Self::Triplanar,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
