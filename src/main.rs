use std::sync::Arc;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use songlist::{cli, config, types::PkceToken, warning};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Compile an artist's catalog into one ordered playlist
    Compile(CompileOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CompileOptions {
    /// Artist name or Spotify artist link
    pub artist: String,

    /// Reverse the order of the songs
    #[clap(short = 'r', long)]
    pub reverse: bool,

    /// Print the songs instead of adding them to the playlist
    #[clap(short = 'd', long)]
    pub dry_run: bool,

    /// Playlist receiving the songs (defaults to SPOTIFY_PLAYLIST_ID)
    #[clap(long)]
    pub playlist: Option<String>,

    #[command(flatten)]
    pub impure: ImpureOptions,
}

#[derive(Args, Debug, Clone)]
#[group(multiple = false)]
pub struct ImpureOptions {
    /// Keep guest appearances and compilations without asking
    #[clap(long)]
    pub include_impure: bool,

    /// Drop guest appearances and compilations without asking
    #[clap(long)]
    pub exclude_impure: bool,
}

impl ImpureOptions {
    fn policy(&self) -> cli::ImpurePolicy {
        if self.include_impure {
            cli::ImpurePolicy::Include
        } else if self.exclude_impure {
            cli::ImpurePolicy::Exclude
        } else {
            cli::ImpurePolicy::Ask
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    // Variables may also come from the process environment.
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Compile(opt) => {
            cli::compile(cli::CompileRequest {
                impure: opt.impure.policy(),
                artist: opt.artist,
                reverse: opt.reverse,
                dry_run: opt.dry_run,
                playlist_id: opt.playlist,
            })
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
