use anilink::anilist::{AnilistClient, MediaIdentifier};
use anilink::{snapshot, AnilistError, SnapshotError};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
struct AnilinkArgs {
    /// Anilist API token.
    #[clap(long, global = true, hide_env_values = true, env = "ANILIST_TOKEN")]
    token: Option<String>,

    /// List collection snapshot file.
    #[clap(long, global = true, default_value = snapshot::DEFAULT_SNAPSHOT_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search Anilist for anime by title.
    Search { query: String },
    /// Show the user the token belongs to.
    Whoami,
    /// Add anime to the watching list.
    Watch { media_id: MediaIdentifier },
    /// Save the anime list collection of the user to the snapshot file.
    Snapshot,
    /// Set the latest watched episode.
    Progress { media_id: MediaIdentifier, progress: i32 },
    /// Set the score of an anime.
    Rate { media_id: MediaIdentifier, score: f64 },
    /// Find anime in the snapshot file by romaji or english title.
    Find { title: String },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("No Anilist token given. Use --token or set ANILIST_TOKEN.")]
    MissingToken,
    #[error(transparent)]
    Anilist(#[from] AnilistError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

fn client(token: Option<String>) -> Result<AnilistClient, CliError> {
    token.map(AnilistClient::new).ok_or(CliError::MissingToken)
}

fn save_snapshot(client: &AnilistClient, file: &Path) -> Result<(), CliError> {
    let user = client.whoami()?;
    let response = client.fetch_list_collection(user.id)?;
    snapshot::save_json_file(file, &response)?;
    log::info!(
        "Saved {} list entries of {} to {}",
        response.collection().entries().count(),
        user,
        file.display()
    );
    Ok(())
}

fn find(file: &Path, title: &str) -> Result<(), CliError> {
    let response = snapshot::load_collection(file)?;
    let matches = response.filter_by_title(title);
    if matches.is_empty() {
        println!("Anime not found.");
    }
    for result in matches {
        println!(
            "Anime ID: {}, Progress: {}, Romaji Title: {}, English Title: {}",
            result.id,
            result.progress,
            result.romaji_title.as_deref().unwrap_or("-"),
            result.english_title.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn run(args: AnilinkArgs) -> Result<(), CliError> {
    match args.command {
        Command::Search { query } => {
            for (title, id) in client(args.token)?.search_or_empty(&query) {
                println!("{}: {}", title, id);
            }
        }
        Command::Whoami => {
            let user = client(args.token)?.whoami()?;
            println!("{}", user);
        }
        Command::Watch { media_id } => {
            client(args.token)?.add_to_watching(media_id)?;
        }
        Command::Snapshot => save_snapshot(&client(args.token)?, &args.file)?,
        Command::Progress { media_id, progress } => {
            client(args.token)?.update_progress(media_id, progress)?;
        }
        Command::Rate { media_id, score } => {
            client(args.token)?.rate(media_id, score)?;
        }
        Command::Find { title } => find(&args.file, &title)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = AnilinkArgs::parse();

    if let Err(error) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Could not initialize logging: {}", error);
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        // Request failures are logged by the client.
        Err(CliError::Anilist(_)) => ExitCode::FAILURE,
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    #[test_case(&["anilink", "search", "frieren"] ; "search")]
    #[test_case(&["anilink", "whoami", "--token", "A"] ; "whoami with token")]
    #[test_case(&["anilink", "progress", "154587", "12"] ; "progress")]
    #[test_case(&["anilink", "rate", "154587", "8.5"] ; "rate")]
    #[test_case(&["anilink", "find", "1P", "--file", "list.json"] ; "find with file")]
    fn parse_arguments(arguments: &[&str]) {
        assert!(AnilinkArgs::try_parse_from(arguments).is_ok());
    }

    #[test_case(&["anilink"] ; "no command")]
    #[test_case(&["anilink", "watch", "one"] ; "non-numeric media ID")]
    #[test_case(&["anilink", "progress", "154587"] ; "missing progress")]
    fn parse_invalid_arguments(arguments: &[&str]) {
        assert!(AnilinkArgs::try_parse_from(arguments).is_err());
    }

    #[test]
    fn default_snapshot_file() {
        let args = AnilinkArgs::try_parse_from(["anilink", "find", "naruto"]).unwrap();
        assert_eq!(args.file, PathBuf::from("response.json"));
    }

    #[test]
    fn missing_token() {
        assert!(matches!(client(None), Err(CliError::MissingToken)));
    }

    #[test]
    fn find_missing_snapshot() {
        let directory = tempfile::tempdir().unwrap();
        let result = find(&directory.path().join("missing.json"), "1P");
        assert!(matches!(result, Err(CliError::Snapshot(_))));
    }
}
