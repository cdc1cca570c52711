//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Geospatial intelligence briefings backed by a generative model
#[derive(Parser, Debug)]
#[command(name = "geointel")]
#[command(about = "Geospatial intelligence briefings backed by a generative model")]
#[command(version)]
pub struct Args {
    /// Config file path (defaults to ./geointel.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON dataset replacing the built-in records
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Never call the model; every action returns its fallback
    #[arg(long, global = true)]
    pub offline: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the layers and how many records each holds
    Layers,

    /// List the features visible for a layer selection and search term
    Show {
        /// Layer to show (can be repeated; defaults to the configured set)
        #[arg(short, long = "layer")]
        layers: Vec<String>,

        /// Case-insensitive search over names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one dataset point or route in detail. Projections and alerts
    /// only live for the run that produced them and are not addressable.
    Inspect {
        /// Point or route id
        id: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the strategic synthesis over the whole dataset
    Analyze {
        #[arg(long)]
        json: bool,
    },

    /// Project hostile mission targets
    Predict {
        #[arg(long)]
        json: bool,
    },

    /// Run the SDRGA withdrawal detection
    Sdrga {
        #[arg(long)]
        json: bool,
    },

    /// Write a briefing of the current view
    Export {
        /// Output format (json, geojson, markdown, html)
        #[arg(short, long)]
        format: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run all three model actions before exporting
        #[arg(long)]
        with_model: bool,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults() {
        let args = Args::try_parse_from(["geointel", "show"]).unwrap();
        assert!(args.config.is_none());
        assert!(!args.offline);
        match args.command {
            Command::Show { layers, search, json } => {
                assert!(layers.is_empty());
                assert!(search.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_show_with_options() {
        let args = Args::try_parse_from([
            "geointel", "show",
            "--layer", "fronts",
            "-l", "urban",
            "--search", "Tumaco",
            "--json",
        ])
        .unwrap();

        match args.command {
            Command::Show { layers, search, json } => {
                assert_eq!(layers, vec!["fronts".to_string(), "urban".to_string()]);
                assert_eq!(search.as_deref(), Some("Tumaco"));
                assert!(json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "geointel", "analyze",
            "--offline",
            "--config", "custom.toml",
            "-v",
        ])
        .unwrap();
        assert!(args.offline);
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(args.command, Command::Analyze { json: false }));
    }

    #[test]
    fn test_export_options() {
        let args = Args::try_parse_from([
            "geointel", "export",
            "--format", "html",
            "--output", "/tmp/briefing",
            "--with-model",
        ])
        .unwrap();

        match args.command {
            Command::Export { format, output, with_model } => {
                assert_eq!(format.as_deref(), Some("html"));
                assert_eq!(output, Some(PathBuf::from("/tmp/briefing")));
                assert!(with_model);
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_inspect_requires_id() {
        assert!(Args::try_parse_from(["geointel", "inspect"]).is_err());
        let args = Args::try_parse_from(["geointel", "inspect", "rt-narino-abades"]).unwrap();
        assert!(matches!(args.command, Command::Inspect { ref id, .. } if id == "rt-narino-abades"));
    }

    #[test]
    fn test_version_command() {
        let args = Args::try_parse_from(["geointel", "version"]).unwrap();
        assert!(matches!(args.command, Command::Version));
    }
}
