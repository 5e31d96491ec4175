//! CLI Module for sazed
//! Lets the store be inspected and edited from the shell without starting
//! the navigator. Running `sazed` with no subcommand opens the navigator.

pub mod commands;

use crate::models::Artifact;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "sazed", version, about = "Organize code snippets by category")]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List categories, or the snippets of one category
    #[command(alias = "ls")]
    List { category: Option<String> },

    /// Print a snippet with its code, tests and notes
    #[command(aliases = ["view", "cat"])]
    Show { category: String, name: String },

    /// Add a snippet to a category
    Add {
        category: String,
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Remove the first snippet with this name
    Rm { category: String, name: String },

    /// Append a tag
    Tag {
        category: String,
        name: String,
        tag: String,
    },

    /// Remove the first occurrence of a tag
    Untag {
        category: String,
        name: String,
        tag: String,
    },

    /// Replace all tags
    SetTags {
        category: String,
        name: String,
        tags: Vec<String>,
    },

    /// Write the code body (from --file, or stdin)
    Code(BodyArgs),

    /// Write the test body (from --file, or stdin)
    Test(BodyArgs),

    /// Write the notes (from --file, or stdin)
    Notes(BodyArgs),

    /// Create a category directory with its metadata document
    NewCategory {
        name: String,
        /// Extension used for code and test files; defaults to the name
        #[arg(long)]
        filetype: Option<String>,
    },
}

#[derive(Debug, clap::Args)]
pub struct BodyArgs {
    pub category: String,
    pub name: String,
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Runs one subcommand against the store at `root`
pub fn execute(command: Command, root: &Path) -> Result<()> {
    match command {
        Command::List { category } => commands::list(root, category.as_deref()),
        Command::Show { category, name } => commands::show(root, &category, &name),
        Command::Add {
            category,
            name,
            description,
        } => commands::add(root, &category, &name, &description),
        Command::Rm { category, name } => commands::remove(root, &category, &name),
        Command::Tag {
            category,
            name,
            tag,
        } => commands::tag(root, &category, &name, &tag),
        Command::Untag {
            category,
            name,
            tag,
        } => commands::untag(root, &category, &name, &tag),
        Command::SetTags {
            category,
            name,
            tags,
        } => commands::set_tags(root, &category, &name, tags),
        Command::Code(args) => commands::set_body(root, Artifact::Code, args),
        Command::Test(args) => commands::set_body(root, Artifact::Tests, args),
        Command::Notes(args) => commands::set_body(root, Artifact::Notes, args),
        Command::NewCategory { name, filetype } => {
            commands::new_category(root, &name, filetype.as_deref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_navigator() {
        let cli = Cli::try_parse_from(["sazed"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_body_and_tag_commands() {
        let cli = Cli::try_parse_from(["sazed", "-v", "code", "go", "demo", "-f", "main.go"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Command::Code(args)) => {
                assert_eq!(args.category, "go");
                assert_eq!(args.name, "demo");
                assert_eq!(args.file, Some(PathBuf::from("main.go")));
            }
            other => panic!("unexpected {:?}", other),
        }

        let cli = Cli::try_parse_from(["sazed", "set-tags", "go", "demo", "a", "b"]).unwrap();
        match cli.command {
            Some(Command::SetTags { tags, .. }) => assert_eq!(tags, ["a", "b"]),
            other => panic!("unexpected {:?}", other),
        }
    }
}
