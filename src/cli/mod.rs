pub mod client;
pub mod commands;
pub mod config;
pub mod guard;
pub mod utils;
pub mod view;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;
use config::{Session, SessionStore};

#[derive(Parser)]
#[command(name = "kodflix")]
#[command(about = "Kodflix CLI - browse the catalog and manage your list")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Server URL (remembered on login)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create an account")]
    Signup {
        #[arg(help = "Display name")]
        uname: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
        #[arg(long, help = "Phone number")]
        phone: Option<String>,
    },

    #[command(about = "Sign in and remember the session")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Forget the current session")]
    Logout,

    #[command(about = "Show the signed-in user")]
    Whoami,

    #[command(about = "Show the home rows")]
    Home,

    #[command(about = "List one category row")]
    Browse {
        #[arg(help = "Category key, e.g. trending, originals, top_rated, action")]
        category: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    #[command(about = "Search the catalog; an empty query shows the home rows")]
    Search {
        #[arg(help = "Search terms")]
        query: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    #[command(about = "Show one movie or show")]
    Details {
        #[arg(help = "movie or tv")]
        media_type: String,
        #[arg(help = "Catalog id")]
        id: u64,
    },

    #[command(about = "Manage My List")]
    Watchlist {
        #[command(subcommand)]
        cmd: commands::watchlist::WatchlistCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Per-invocation state: output format plus the session loaded from disk
pub struct Context {
    pub output: OutputFormat,
    pub store: SessionStore,
    pub session: Session,
}

impl Context {
    /// Client carrying the session token, if any
    pub fn client(&self) -> anyhow::Result<ApiClient> {
        ApiClient::new(&self.session.server, self.session.token.as_deref())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.store.save(&self.session)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = OutputFormat::from_cli(&cli);
    let store = SessionStore::open()?;
    let mut session = store.load()?;
    if let Some(server) = cli.server {
        session.server = server;
    }

    let mut ctx = Context {
        output,
        store,
        session,
    };

    match cli.command {
        Commands::Signup {
            uname,
            email,
            password,
            phone,
        } => commands::auth::signup(&ctx, &uname, &email, &password, phone.as_deref()).await,
        Commands::Login { email, password } => {
            commands::auth::login(&mut ctx, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Home => commands::catalog::home(&ctx).await,
        Commands::Browse { category, page } => {
            commands::catalog::browse(&ctx, &category, page).await
        }
        Commands::Search { query, page } => {
            commands::catalog::search(&ctx, &query.join(" "), page).await
        }
        Commands::Details { media_type, id } => {
            commands::catalog::details(&ctx, &media_type, id).await
        }
        Commands::Watchlist { cmd } => commands::watchlist::handle(&ctx, cmd).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watchlist_add() {
        let cli = Cli::try_parse_from(["kodflix", "--json", "watchlist", "add", "tv", "1399"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Watchlist {
                cmd: commands::watchlist::WatchlistCommands::Add { media_type, id },
            } => {
                assert_eq!(media_type, "tv");
                assert_eq!(id, 1399);
            }
            _ => panic!("expected watchlist add"),
        }
    }

    #[test]
    fn search_joins_terms_and_allows_empty() {
        let cli = Cli::try_parse_from(["kodflix", "search", "the", "wire"]).unwrap();
        match cli.command {
            Commands::Search { query, page } => {
                assert_eq!(query.join(" "), "the wire");
                assert_eq!(page, 1);
            }
            _ => panic!("expected search"),
        }

        let cli = Cli::try_parse_from(["kodflix", "search"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { ref query, .. } if query.is_empty()));
    }

    #[test]
    fn login_requires_password() {
        assert!(Cli::try_parse_from(["kodflix", "login", "a@b.co"]).is_err());
    }
}
