//! Main entry point for the haunted CLI application.
//!
//! This binary exposes the ghost sharing API on the command line and can
//! list or extract ghost bundles that have already been decompressed.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use haunted_client::cli::{Command, CreateSessionArgs, RemoteCommand, UntarArgs};
use haunted_client::schema::{CreateSessionRequest, RegisterRequest, TimeSpan};
use haunted_client::tar::ensure_relative;
use haunted_client::{ApiClient, Cli, ClientConfig, LoginRequest, TarEntry, TarExtractor, UploadFile};

/// Application entry point.
///
/// Parses command-line arguments, sets up logging and dispatches to the
/// local archive handler or to the API.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.command {
        // Local bundles need no server
        Command::Untar(args) => process_tar(args, cli.is_quiet()).await,
        Command::Remote(command) => run_remote(&cli, command).await,
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v`/`-q` flags when set.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run a command against the API.
///
/// Logs in first when credentials were given, so the session cookie is in
/// the client's jar for the actual command.
async fn run_remote(cli: &Cli, command: &RemoteCommand) -> Result<()> {
    let config = match &cli.server {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::default(),
    };
    let client = ApiClient::new(config)?;

    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        let reply = client
            .login(&LoginRequest {
                username: username.clone(),
                password: password.clone(),
            })
            .await?;
        if !reply.success {
            bail!("Login failed: {}", reply.message);
        }
    }

    match command {
        RemoteCommand::Info => print_json(&client.get_server_info().await?),
        RemoteCommand::Tags => print_json(&client.get_tags().await?),
        RemoteCommand::Sessions => print_json(&client.get_sessions().await?),
        RemoteCommand::Session { id } => print_json(&client.get_session(id).await?),
        RemoteCommand::Announcements => print_json(&client.get_announcements().await?),
        RemoteCommand::Profile => print_json(&client.get_profile().await?),
        RemoteCommand::Register {
            username,
            email,
            password,
        } => {
            let request = RegisterRequest {
                email: email.clone(),
                password: password.clone(),
                username: username.clone(),
            };
            print_json(&client.register(&request).await?)
        }
        RemoteCommand::CreateSession(args) => {
            print_json(&client.create_session(&create_session_request(args)).await?)
        }
        RemoteCommand::DeleteSession { id } => print_json(&client.delete_session(id).await?),
        RemoteCommand::Ghosts { staging: false } => print_json(&client.get_ghosts().await?),
        RemoteCommand::Ghosts { staging: true } => print_json(&client.get_staging_ghosts().await?),
        RemoteCommand::Ghost { id } => print_json(&client.get_ghost(*id).await?),
        RemoteCommand::Quota => print_json(&client.get_ghosts_quota().await?),
        RemoteCommand::Levels { identifier } => {
            print_json(&client.get_alternative_levels(identifier).await?)
        }
        RemoteCommand::Upload { files } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in files {
                let file = UploadFile::from_path(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                uploads.push(file);
            }
            print_json(&client.upload_ghosts(&uploads).await?)
        }
        RemoteCommand::DeleteGhost { id } => print_json(&client.delete_ghost(*id).await?),
        RemoteCommand::Download { id, output } => download(&client, *id, output.as_deref(), cli.is_quiet()).await,
    }
}

fn create_session_request(args: &CreateSessionArgs) -> CreateSessionRequest {
    let time = match (&args.start, &args.end) {
        (Some(start), Some(end)) => Some(TimeSpan {
            end: end.clone(),
            start: start.clone(),
        }),
        _ => None,
    };

    CreateSessionRequest {
        description: args.description.clone(),
        private: args.private,
        tags: args.tags.clone(),
        time,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Save a ghost bundle to disk.
async fn download(client: &ApiClient, id: i64, output: Option<&Path>, quiet: bool) -> Result<()> {
    let Some(bundle) = client.download_ghost(id).await? else {
        bail!("Ghost {} has no downloadable data", id);
    };

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("ghost-{}.tar.xz", id)));
    tokio::fs::write(&output_path, &bundle)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if !quiet {
        eprintln!(
            "Saved {} ({})",
            output_path.display(),
            format_size(bundle.len() as u64)
        );
    }

    Ok(())
}

/// Process a local tar bundle based on CLI options.
///
/// This function handles both listing and extraction modes:
/// - List mode (`-l`): Display archive contents
/// - Extract mode: Extract files matching the specified filters
async fn process_tar(args: &UntarArgs, quiet: bool) -> Result<()> {
    let data = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let extractor = TarExtractor::new(&data);

    // List mode: display archive contents and exit
    if args.list {
        list_files(&extractor);
        return Ok(());
    }

    let entries = extractor.list_files();

    // Apply filters to determine which files to extract:
    // 1. If specific files are requested, only include matching entries
    // 2. Exclude files matching the exclusion patterns
    let files_to_extract: Vec<_> = entries
        .iter()
        .filter(|e| {
            if !args.files.is_empty() {
                let matches = args.files.iter().any(|f| {
                    if has_glob_chars(f) {
                        glob_match(f, &e.name)
                    } else {
                        // No wildcards: exact match on name or base name
                        e.name == *f || base_name(&e.name) == *f
                    }
                });
                if !matches {
                    return false;
                }
            }

            !args
                .exclude
                .iter()
                .any(|x| e.name.contains(x.as_str()) || glob_match(x, &e.name))
        })
        .collect();

    // Extract each matching file
    let quiet = quiet || args.pipe;
    let multiple_files = args.pipe && files_to_extract.len() > 1;
    for entry in files_to_extract {
        extract_file(&extractor, entry, args, quiet, multiple_files).await?;
    }

    Ok(())
}

/// List files in the bundle with their sizes and a total line.
fn list_files(extractor: &TarExtractor<'_>) {
    let entries = extractor.list_files();

    println!("{:>10}  Name", "Length");
    println!("{}", "-".repeat(40));

    let mut total = 0u64;
    for entry in &entries {
        println!("{:>10}  {}", entry.size, entry.name);
        total += entry.size as u64;
    }

    println!("{}", "-".repeat(40));
    println!("{:>10}  {} files ({})", total, entries.len(), format_size(total));
}

/// Extract a single file from the bundle.
///
/// Handles various extraction options:
/// - Pipe mode (`-p`): Write to stdout instead of file
/// - Custom output directory (`-d`): Extract to specified directory
/// - Junk paths (`-j`): Ignore directory structure in bundle
/// - Overwrite control (`-n`, `-o`): Handle existing files
async fn extract_file(
    extractor: &TarExtractor<'_>,
    entry: &TarEntry,
    args: &UntarArgs,
    quiet: bool,
    show_filename: bool,
) -> Result<()> {
    // Pipe mode: write file contents directly to stdout
    if args.pipe {
        if show_filename {
            use tokio::io::AsyncWriteExt;
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(format!("--- {} ---\n", entry.name).as_bytes())
                .await?;
        }
        return extractor.extract_to_stdout(entry).await;
    }

    ensure_relative(&entry.name)?;

    let file_name = if args.junk_paths {
        base_name(&entry.name)
    } else {
        entry.name.clone()
    };
    let output_path = match &args.extract_dir {
        Some(dir) => dir.join(&file_name),
        None => PathBuf::from(&file_name),
    };

    // Handle existing files based on overwrite options
    if output_path.exists() {
        if args.never_overwrite {
            if !quiet {
                eprintln!("Skipping: {} (file exists)", entry.name);
            }
            return Ok(());
        }

        if !args.overwrite {
            if !quiet {
                eprintln!("Skipping: {} (use -o to overwrite)", entry.name);
            }
            return Ok(());
        }
    }

    if !quiet {
        println!("  extracting: {}", entry.name);
    }

    extractor.extract_to_file(entry, &output_path).await
}

fn base_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Check if a pattern contains glob wildcard characters.
fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Simple glob pattern matching supporting `*` and `?` wildcards.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();

    fn do_match(pattern: &[char], text: &[char]) -> bool {
        match (pattern.first(), text.first()) {
            (None, None) => true,
            // Star: skip it, or consume one character and keep it
            (Some('*'), _) => {
                do_match(&pattern[1..], text) || (!text.is_empty() && do_match(pattern, &text[1..]))
            }
            (Some('?'), Some(_)) => do_match(&pattern[1..], &text[1..]),
            (Some(p), Some(t)) if *p == *t => do_match(&pattern[1..], &text[1..]),
            _ => false,
        }
    }

    do_match(&pattern_chars, &text_chars)
}

/// Format a byte size into a human-readable string.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_patterns() {
        assert!(glob_match("*.yml", "ghost.yml"));
        assert!(glob_match("run?.bin", "run1.bin"));
        assert!(!glob_match("*.yml", "ghost.bin"));
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(500), "500 bytes");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
    }

    #[test]
    fn session_time_needs_both_ends() {
        let args = CreateSessionArgs {
            description: "race".into(),
            private: true,
            tags: vec![1, 2],
            start: Some("2024-01-01T18:00:00Z".into()),
            end: Some("2024-01-01T20:00:00Z".into()),
        };
        let request = create_session_request(&args);
        assert_eq!(request.tags, vec![1, 2]);
        assert_eq!(
            request.time.map(|t| t.start),
            Some("2024-01-01T18:00:00Z".to_string())
        );
    }
}
