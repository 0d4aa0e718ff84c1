use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::SERVER_URL_ENV;

#[derive(Parser, Debug)]
#[command(name = "haunted")]
#[command(version)]
#[command(about = "Client for the haunted sessions ghost sharing service", long_about = None)]
#[command(after_help = "Examples:\n  \
  haunted sessions                           list co-op sessions as JSON\n  \
  haunted --username me ghosts --staging     list my unpublished ghosts\n  \
  haunted download 42 -o run.tar.xz          save a ghost bundle\n  \
  haunted untar run.tar -l                   list files in a decompressed bundle")]
pub struct Cli {
    /// Server base URL
    #[arg(long, global = true, env = SERVER_URL_ENV, value_name = "URL")]
    pub server: Option<String>,

    /// Log in as this user before running the command
    #[arg(long, global = true, env = "HAUNTED_USERNAME", requires = "password")]
    pub username: Option<String>,

    /// Password for --username
    #[arg(long, global = true, env = "HAUNTED_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// More log output (-vv => debug)
    #[arg(short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List or extract a (decompressed) ghost bundle
    Untar(UntarArgs),
    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Commands that talk to the server
#[derive(Subcommand, Debug)]
pub enum RemoteCommand {
    /// Server statistics
    Info,
    /// All session tags
    Tags,
    /// All visible sessions
    Sessions,
    /// A single session
    Session {
        id: String,
    },
    /// Site announcements
    Announcements,
    /// Current user's profile
    Profile,
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Create a co-op session
    CreateSession(CreateSessionArgs),
    /// Delete one of your sessions
    DeleteSession {
        id: String,
    },
    /// Published ghosts, or your staging area with --staging
    Ghosts {
        #[arg(long)]
        staging: bool,
    },
    /// A single ghost
    Ghost {
        id: i64,
    },
    /// Your ghost storage quota
    Quota,
    /// Levels sharing an identifier
    Levels {
        identifier: String,
    },
    /// Upload ghost bundles (.tar.xz)
    Upload {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Delete one of your ghosts
    DeleteGhost {
        id: i64,
    },
    /// Download a ghost bundle
    Download {
        id: i64,
        /// Output file (default: ghost-<id>.tar.xz)
        #[arg(short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct CreateSessionArgs {
    #[arg(long, default_value = "")]
    pub description: String,

    /// Hide the session from the public list
    #[arg(long)]
    pub private: bool,

    /// Tag id (repeatable)
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<i64>,

    /// Start time, e.g. 2024-01-01T18:00:00Z
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// End time
    #[arg(long, requires = "start")]
    pub end: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("overwrite_mode").args(["never_overwrite", "overwrite"])))]
pub struct UntarArgs {
    /// Tar file path
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Files to extract (default: all)
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// List files
    #[arg(short = 'l')]
    pub list: bool,

    /// Extract files to pipe, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<PathBuf>,

    /// Exclude files that follow
    #[arg(short = 'x', value_name = "FILE", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Never overwrite existing files
    #[arg(short = 'n')]
    pub never_overwrite: bool,

    /// Overwrite files WITHOUT prompting
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Junk paths (do not make directories)
    #[arg(short = 'j')]
    pub junk_paths: bool,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (q, _) if q > 1 => "off",
            (1, _) => "error",
            (_, 0) => "warn",
            (_, 1) => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_untar_flags() {
        let cli = Cli::try_parse_from(["haunted", "untar", "run.tar", "-l", "-x", "a.bin"]).unwrap();
        match cli.command {
            Command::Untar(args) => {
                assert!(args.list);
                assert_eq!(args.exclude, vec!["a.bin".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbosity_maps_to_filter() {
        let cli = Cli::try_parse_from(["haunted", "-vv", "info"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["haunted", "-q", "info"]).unwrap();
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn api_commands_are_top_level() {
        let cli = Cli::try_parse_from(["haunted", "download", "7", "-o", "run.tar.xz"]).unwrap();
        match cli.command {
            Command::Remote(RemoteCommand::Download { id, output }) => {
                assert_eq!(id, 7);
                assert_eq!(output, Some(PathBuf::from("run.tar.xz")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn overwrite_flags_conflict() {
        assert!(Cli::try_parse_from(["haunted", "untar", "run.tar", "-n", "-o"]).is_err());
    }
}
