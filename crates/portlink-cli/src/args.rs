//! Command-line argument definitions for the Portlink CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the operation; global options control
//! the backing file, configuration file selection, and logging verbosity.
//!
//! Positional arguments of the subcommands are optional at the parser level
//! so that a missing argument prints that subcommand's usage instead of
//! failing the run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the Portlink wiring tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the XML backing file
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

/// Operations on the wiring diagram
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Link a source port to a destination port
    Add {
        /// Source reference, `Module::Port[:Type]`
        source: Option<String>,
        /// Destination reference, `Module[::Port[:Type]]`
        destination: Option<String>,
    },

    /// Remove the link between two ports
    Remove {
        /// Source reference, `Module::Port`
        source: Option<String>,
        /// Destination reference, `Module::Port`
        destination: Option<String>,
    },

    /// Show the ports of one module
    List {
        /// Module name
        module: Option<String>,
    },

    /// Print a text diagram of all modules
    Draw,

    /// Export the diagram as Graphviz DOT and render it
    Dot {
        /// Where to write the DOT file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the DOT file only, without running the renderer
        #[arg(long)]
        no_render: bool,
    },
}

impl Command {
    /// The subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Remove { .. } => "remove",
            Command::List { .. } => "list",
            Command::Draw => "draw",
            Command::Dot { .. } => "dot",
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["portlink"]).unwrap();
        assert_eq!(args.command, None);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_add_with_missing_destination() {
        let args = Args::try_parse_from(["portlink", "add", "A::p"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Add {
                source: Some("A::p".to_owned()),
                destination: None
            })
        );
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args =
            Args::try_parse_from(["portlink", "list", "Osc", "--store", "wiring.xml"]).unwrap();
        assert_eq!(args.store, Some(PathBuf::from("wiring.xml")));
        assert_eq!(args.command.map(|c| c.name()), Some("list"));
    }

    #[test]
    fn test_dot_options() {
        let args =
            Args::try_parse_from(["portlink", "dot", "--output", "out.dot", "--no-render"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Dot {
                output: Some(PathBuf::from("out.dot")),
                no_render: true
            })
        );
    }

    #[test]
    fn test_extra_arguments_are_rejected() {
        assert!(Args::try_parse_from(["portlink", "add", "A::p", "B::q", "C::r"]).is_err());
    }
}
