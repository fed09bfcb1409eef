//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::config_file::ConfigFile;
use crate::drafts::DraftStore;
use crate::panel::PanelTuning;

/// Process exit codes
pub mod exit_code {
    /// Normal exit
    pub const SUCCESS: i32 = 0;
    /// Runtime error occurred
    pub const ERROR: i32 = 2;
    /// Invalid arguments or options (e.g., unknown flag, missing value)
    pub const INVALID: i32 = 3;
}

/// Environment variable overriding the backend URL
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";
/// Environment variable overriding the backend token
pub const BACKEND_TOKEN_ENV: &str = "BACKEND_TOKEN";

/// Raw command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub backend_url: Option<String>,
    pub fake: bool,
    pub config: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub help: bool,
    pub version: bool,
}

impl CliArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let mut cli = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend-url" => {
                    if let Some(url) = args.next() {
                        cli.backend_url = Some(url);
                    } else {
                        anyhow::bail!("--backend-url requires a URL");
                    }
                }
                "--fake" => cli.fake = true,
                "--config" | "-c" => {
                    if let Some(path) = args.next() {
                        cli.config = Some(PathBuf::from(path));
                    } else {
                        anyhow::bail!("--config requires a file path");
                    }
                }
                "--log-file" => {
                    if let Some(path) = args.next() {
                        cli.log_file = Some(PathBuf::from(path));
                    } else {
                        anyhow::bail!("--log-file requires a file path");
                    }
                }
                "--help" | "-h" => cli.help = true,
                "--version" | "-V" => cli.version = true,
                unknown => {
                    anyhow::bail!(
                        "Unknown option: {}. Use --help for usage information.",
                        unknown
                    );
                }
            }
        }
        Ok(cli)
    }
}

/// Which data source to talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    Fake,
    Http {
        url: String,
        token: Option<String>,
        timeout: Duration,
    },
}

/// Application configuration from CLI args, environment and config file
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendChoice,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub tuning: PanelTuning,
    pub fetch_limit: usize,
    pub chord_window: Duration,
    pub status_ttl: Duration,
    pub switch_settle: Duration,
    pub drafts_path: PathBuf,
    pub max_drafts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(&CliArgs::default(), ConfigFile::default(), |_| None)
    }
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        let cli = CliArgs::parse(env::args().skip(1))?;
        if cli.help {
            print_help();
            std::process::exit(exit_code::SUCCESS);
        }
        if cli.version {
            println!("tuitter {}", env!("CARGO_PKG_VERSION"));
            std::process::exit(exit_code::SUCCESS);
        }

        let file = match &cli.config {
            Some(path) => ConfigFile::load_from(path)
                .map_err(|e| anyhow::anyhow!("Cannot read config {}: {}", path.display(), e))?,
            None => ConfigFile::load(),
        };
        Ok(Self::resolve(&cli, file, |key| env::var(key).ok()))
    }

    /// Merge sources. CLI > environment > config file > defaults;
    /// `--fake` beats any URL.
    pub fn resolve(
        cli: &CliArgs,
        file: ConfigFile,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let url = cli
            .backend_url
            .clone()
            .or_else(|| env_var(BACKEND_URL_ENV))
            .or(file.backend.url.clone())
            .filter(|u| !u.trim().is_empty());
        let token = env_var(BACKEND_TOKEN_ENV).or(file.backend.token.clone());

        let backend = match url {
            Some(url) if !cli.fake => BackendChoice::Http {
                url,
                token,
                timeout: Duration::from_secs(file.backend.timeout_secs.max(1)),
            },
            _ => BackendChoice::Fake,
        };

        let drafts_path = file
            .drafts
            .path
            .clone()
            .or_else(DraftStore::default_path)
            .unwrap_or_else(|| PathBuf::from(".tuitter_drafts.json"));

        Self {
            backend,
            log_file: cli.log_file.clone().or(file.logging.file.clone()),
            log_level: file.logging.level.clone(),
            tuning: file.tuning(),
            fetch_limit: file.feed.fetch_limit.max(1),
            chord_window: Duration::from_millis(file.navigation.chord_timeout_ms),
            status_ttl: Duration::from_millis(file.timing.status_clear_ms),
            switch_settle: Duration::from_millis(file.timing.switch_settle_ms),
            drafts_path,
            max_drafts: file.drafts.max_drafts,
        }
    }
}

fn print_help() {
    println!(
        r#"tuitter - A vim-style terminal social network client

USAGE:
    tuitter [OPTIONS]

OPTIONS:
    --backend-url URL   REST API base URL (default: in-memory demo data)
    --fake              Use the in-memory demo backend even if a URL is set
    -c, --config FILE   Read configuration from FILE
    --log-file FILE     Write logs to FILE
    -h, --help          Show this help message
    -V, --version       Show version

CONFIG FILE:
    ~/.config/tuitter/config.toml    Main configuration file
    ~/.config/tuitter/keymap.toml    Key bindings (customizable)

ENVIRONMENT:
    BACKEND_URL         REST API base URL
    BACKEND_TOKEN       Bearer token for the REST API
    TUITTER_LOG         Log filter (e.g. debug, tuitter::core=trace)

KEYBINDINGS:
    j/k         Move down / up
    gg / G      Go to top / bottom
    Ctrl+D/U    Half page down / up
    w/b         Jump 3 items down / up
    h/l         Select action or button
    i           Insert mode (type in the focused field)
    Esc         Back to normal mode
    : or /      Command mode
    1-5         Timeline, Discover, Notifications, Messages, Settings
    p / d       Profile / Drafts
    0 / 6       Focus main panel / conversation list
    Enter       Activate
    q           Quit (or close comments)

COMMANDS:
    :1-:5       Switch screen
    :n          New post (focus message input on Messages)
    :l :rt :c   Like, repost, comment on the focused post
    :u :m       View author, message author
    :P :D       Profile, Drafts
    :o<N> :x<N> Open / delete draft N
    :q          Quit

EXIT CODES:
    0           Success
    2           Error (runtime error)
    3           Invalid arguments (unknown option or invalid value)
"#
    );
}
