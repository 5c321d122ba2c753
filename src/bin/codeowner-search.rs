use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use codeowner_search::search::filter_items;
use codeowner_search::{
    CodeOwnerSearch, Config, Host, Location, Owner, OwnershipManifest, PresentationItem,
    RipgrepRunner, SearchController, WorkflowOutcome,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{self, EnvFilter};

/// Search the files a CODEOWNERS entry owns, then jump to a match
#[derive(Parser)]
#[command(name = "codeowner-search", version)]
struct Args {
    /// Workspace root containing the CODEOWNERS file
    #[arg(long, env = "CODEOWNER_SEARCH_ROOT", default_value = ".")]
    root: PathBuf,

    /// Search program to run
    #[arg(long = "rg", env = "CODEOWNER_SEARCH_RG", default_value = "rg")]
    search_program: String,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Search an owner's files and open a match
    Search {
        /// Text to search for (prompted when omitted)
        term: Option<String>,
        /// Owner to scope the search to (picked from a list when omitted)
        #[arg(long)]
        owner: Option<String>,
        /// Open the first match without asking
        #[arg(long)]
        first: bool,
    },
    /// List every owner in the manifest
    Owners,
    /// List the path patterns assigned to an owner
    Patterns {
        owner: String,
        /// Match the owner as a whole token
        #[arg(long)]
        exact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config = Config::new(args.root.clone()).search_program(&args.search_program);

    match args.command {
        Cmd::Owners => {
            let manifest = load_manifest(&config)?;
            let owners: Vec<Owner> = manifest.owners(config.sigil()).into_iter().collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&owners)?);
            } else {
                for owner in owners {
                    println!("{owner}");
                }
            }
        }
        Cmd::Patterns { owner, exact } => {
            let manifest = load_manifest(&config)?;
            let Some(owner) = Owner::parse(&owner, config.sigil()) else {
                bail!("owner must start with '{}'", config.sigil());
            };
            let patterns = if exact {
                manifest.patterns_for_exact(&owner)
            } else {
                manifest.patterns_for(&owner)
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&patterns)?);
            } else {
                for pattern in patterns {
                    println!("{pattern}");
                }
            }
        }
        Cmd::Search { term, owner, .. } if args.json => {
            let (Some(term), Some(owner)) = (term, owner) else {
                bail!("--json searches need both a term and --owner");
            };
            let outcome = CodeOwnerSearch::workspace(config)
                .owner(&owner)
                .term(&term)
                .search()
                .await
                .context("search failed")?;
            if let Some(diagnostics) = &outcome.diagnostics {
                eprintln!("{}", diagnostics.trim_end());
            }
            println!("{}", serde_json::to_string_pretty(&outcome.items())?);
        }
        Cmd::Search { term, owner, first } => {
            let host = TerminalHost::new(term, owner, first);
            let mut controller = SearchController::new(config, host, RipgrepRunner::new());
            controller.start().context("could not start codeowner search")?;
            let outcome = controller.search_by_code_owner().await?;
            controller.stop();
            if outcome == WorkflowOutcome::Cancelled {
                tracing::debug!("search cancelled");
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` directives when given and valid, `info` otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn load_manifest(config: &Config) -> Result<OwnershipManifest> {
    let path = config.manifest_path();
    OwnershipManifest::load(&path).with_context(|| format!("reading {}", path.display()))
}

/// Numbered menus on the terminal; answers given on the command line skip their prompt
struct TerminalHost {
    term: Option<String>,
    owner: Option<String>,
    pick_first: bool,
}

impl TerminalHost {
    fn new(term: Option<String>, owner: Option<String>, pick_first: bool) -> Self {
        Self {
            term,
            owner,
            pick_first,
        }
    }

    fn read_line(prompt: &str) -> codeowner_search::Result<Option<String>> {
        print!("{prompt} ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Host for TerminalHost {
    fn input_box(&mut self, prompt: &str) -> codeowner_search::Result<Option<String>> {
        match self.term.take() {
            Some(term) => Ok(Some(term)),
            None => Self::read_line(prompt),
        }
    }

    fn pick_owner(&mut self, owners: &[Owner]) -> codeowner_search::Result<Option<Owner>> {
        if let Some(wanted) = self.owner.take() {
            let found = owners.iter().find(|o| o.as_str() == wanted).cloned();
            if found.is_none() {
                self.show_error(&format!("Unknown owner {wanted}"));
            }
            return Ok(found);
        }

        for (i, owner) in owners.iter().enumerate() {
            println!("{:>3}) {}", i + 1, owner);
        }
        let Some(answer) = Self::read_line("Owner #:")? else {
            return Ok(None);
        };
        Ok(answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| owners.get(i))
            .cloned())
    }

    fn pick_match(&mut self, items: &[PresentationItem]) -> codeowner_search::Result<Option<usize>> {
        if self.pick_first {
            return Ok(Some(0));
        }

        let mut query = String::new();
        loop {
            let shown = filter_items(items, &query);
            for (i, item) in shown.iter().enumerate() {
                println!("{:>3}) {}  {}", i + 1, item.label, item.description);
                println!("     {}", item.detail);
            }
            let Some(answer) = Self::read_line("Match # (text filters, empty cancels):")? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) => {
                    let chosen = n.checked_sub(1).and_then(|i| shown.get(i));
                    if let Some(chosen) = chosen {
                        return Ok(items.iter().position(|item| std::ptr::eq(item, *chosen)));
                    }
                    self.show_error(&format!("No match numbered {n}"));
                }
                Err(_) => query = answer,
            }
        }
    }

    fn open_at(&mut self, location: &Location) -> codeowner_search::Result<()> {
        let display_line = location.cursor.display_line();
        let editor = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .ok()
            .filter(|e| !e.trim().is_empty());

        let Some(editor) = editor else {
            println!("{}:{}", location.path.display(), display_line);
            return Ok(());
        };

        let status = std::process::Command::new(&editor)
            .arg(format!("+{display_line}"))
            .arg(&location.path)
            .status()
            .map_err(|e| codeowner_search::SearchError::Host(format!("failed to launch {editor}: {e}")))?;
        if !status.success() {
            return Err(codeowner_search::SearchError::Host(format!(
                "{editor} exited with {status}"
            )));
        }
        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message.trim_end());
    }

    fn show_info(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
