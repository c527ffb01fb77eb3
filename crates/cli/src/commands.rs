//! Operator subcommands.

use anyhow::{Result, bail};
use clap::Subcommand;
use informers_client::render::domain_status;
use informers_client::{InformerService, LoaderSettings, PageKind, PageRequest, RenderContext};
use informers_core::text::mask_api_key;
use informers_core::{Error, Features};

/// Page kind argument for `render`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PageArg {
    Public,
    Admin,
    BuilderEditor,
}

impl From<PageArg> for PageKind {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::Public => PageKind::Public,
            PageArg::Admin => PageKind::Admin,
            PageArg::BuilderEditor => PageKind::BuilderEditor,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store the API key as given, without validation
    SetKey {
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Show the stored API key, masked
    GetKey,

    /// Set the site-wide default informer
    SetDefault {
        #[arg(value_name = "ID")]
        id: String,
    },

    GetDefault,

    /// Clear the cached directory and fetch it again
    Refresh,

    /// Clear the cached directory for the current key
    ClearCache {
        /// Drop the snapshots of every key, as on uninstall
        #[arg(long)]
        all: bool,
    },

    /// Delete cached directories whose lifetime has passed
    PurgeExpired,

    /// Delete stored settings and every cached directory
    RemoveData {
        /// Skip the confirmation requirement
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List informers available for the stored key
    List,

    /// Render content containing shortcodes or placeholders
    Render {
        #[arg(value_name = "TEXT")]
        text: String,

        #[arg(long, value_enum, default_value_t = PageArg::Public)]
        page: PageArg,
    },
}

/// What a command reports back, WP-CLI style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Line(String),
    Warning(String),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(msg) => write!(f, "Success: {msg}"),
            Self::Line(msg) => write!(f, "{msg}"),
            Self::Warning(msg) => write!(f, "Warning: {msg}"),
        }
    }
}

/// Everything a command needs besides its arguments.
pub struct Context {
    pub service: InformerService,
    pub loader: LoaderSettings,
    pub site_host: String,
    pub features: Features,
}

pub async fn execute(ctx: &Context, command: Commands) -> Result<Outcome> {
    let store = ctx.service.store();

    match command {
        Commands::SetKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                bail!("API key is required.");
            }
            store.set_api_key(key).await?;
            Ok(Outcome::Success(format!("API key saved: {}", mask_api_key(key))))
        }
        Commands::GetKey => {
            let key = store.api_key().await?;
            if key.is_empty() {
                return Ok(Outcome::Warning("API key is not set.".into()));
            }
            Ok(Outcome::Line(format!("Current API key: {}", mask_api_key(&key))))
        }
        Commands::SetDefault { id } => {
            let id = id.trim();
            if id.is_empty() {
                bail!("Informer ID is required.");
            }
            store.set_default_informer_id(id).await?;
            Ok(Outcome::Success(format!("Default informer set to: {id}")))
        }
        Commands::GetDefault => {
            let id = store.default_informer_id().await?;
            if id.is_empty() {
                return Ok(Outcome::Warning("No default informer set.".into()));
            }
            Ok(Outcome::Line(format!("Default informer ID: {id}")))
        }
        Commands::Refresh => match ctx.service.refresh().await {
            Ok(informers) => Ok(Outcome::Success(format!("Informer list refreshed ({} informers).", informers.len()))),
            Err(Error::RefreshFailed) => Ok(Outcome::Warning("Directory returned no informers.".into())),
            Err(e) => Err(e.into()),
        },
        Commands::ClearCache { all: false } => {
            ctx.service.clear_cache().await?;
            Ok(Outcome::Success("Cache cleared.".into()))
        }
        Commands::ClearCache { all: true } => {
            let purged = store.purge_all_directories().await?;
            Ok(Outcome::Success(format!("Cache cleared ({purged} snapshots).")))
        }
        Commands::PurgeExpired => {
            let purged = store.purge_expired_directories().await?;
            Ok(Outcome::Success(format!("Purged {purged} expired snapshots.")))
        }
        Commands::RemoveData { yes } => {
            if !yes {
                bail!("This deletes the API key, the default informer and all cached data. Pass --yes to confirm.");
            }
            let deleted = store.delete_all_data().await?;
            Ok(Outcome::Success(format!("Removed all informer data ({deleted} rows).")))
        }
        Commands::List => {
            let informers = ctx.service.get_informers().await;
            if informers.is_empty() {
                return Ok(Outcome::Warning("No informers available.".into()));
            }
            let lines: Vec<String> = informers
                .iter()
                .map(|informer| {
                    let state = if informer.active { "active" } else { "inactive" };
                    let badge = domain_status(&informers, &informer.informer_id, &ctx.site_host)
                        .map(|s| s.badge())
                        .unwrap_or("-");
                    format!("{}\t{}\t{state}\t{badge}", informer.informer_id, informer.domain)
                })
                .collect();
            Ok(Outcome::Line(lines.join("\n")))
        }
        Commands::Render { text, page } => {
            if text.is_empty() {
                bail!("Text to render is required.");
            }
            let request = PageRequest { page: page.into(), content: text, ..Default::default() };
            let mut render = RenderContext::new(
                ctx.service.clone(),
                request.page,
                ctx.loader.clone(),
                ctx.site_host.as_str(),
                ctx.features,
            );
            let out = render.render_page(&request).await;
            Ok(Outcome::Line(format!("{}{}{}", out.head, out.content, out.footer)))
        }
    }
}
