//! Armory CLI
//!
//! Mines premodern combat weapons out of encyclopedia articles and writes
//! them as game weapons.

mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use armory_core::{DiscardMemo, DropStats, Link, RawArticle, Vocabulary, WIKI_PREFIX};
use armory_extract::{build_vocabulary, SharedRng, Thesaurus, WeaponForge, WordNet};
use armory_runtime::{load_articles, CrawlConfig, CrawlOutcome, Crawler, LinkProbe};
use armory_wiki::{HttpDocuments, WikiConfig};

use report::{default_report_path, write_report};

#[derive(Parser)]
#[command(name = "armory")]
#[command(author, version, about = "Armory: premodern weapons mined from encyclopedia articles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl, extract and write the weapon report
    Run {
        #[command(flatten)]
        crawl: CrawlArgs,

        #[command(flatten)]
        lexicon: LexiconArgs,

        #[command(flatten)]
        forge: ForgeArgs,
    },

    /// Crawl only, writing the link and article checkpoints
    Crawl {
        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Extract weapons from an existing article checkpoint (no network)
    Extract {
        /// Article checkpoint to read
        #[arg(long, default_value = "Details.json")]
        details: PathBuf,

        #[command(flatten)]
        lexicon: LexiconArgs,

        #[command(flatten)]
        forge: ForgeArgs,
    },

    /// Classify a single link and print its state
    Check {
        /// Article path (e.g. /wiki/Falchion) or full article URL
        url: String,

        #[command(flatten)]
        wiki: WikiArgs,
    },
}

#[derive(Args)]
struct WikiArgs {
    /// Encyclopedia base URL
    #[arg(long, env = "ARMORY_WIKI_URL")]
    wiki_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Fetches allowed in flight at once
    #[arg(long)]
    slots: Option<usize>,
}

impl WikiArgs {
    fn config(&self) -> WikiConfig {
        let mut config = WikiConfig::default();
        if let Some(url) = &self.wiki_url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(slots) = self.slots {
            config.slots = slots;
        }
        config
    }
}

#[derive(Args)]
struct CrawlArgs {
    #[command(flatten)]
    wiki: WikiArgs,

    /// Article the discovery starts from
    #[arg(long)]
    seed: Option<String>,

    /// Links probed at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Confirmed links checkpoint
    #[arg(long)]
    links: Option<PathBuf>,

    /// Downloaded articles checkpoint
    #[arg(long)]
    details: Option<PathBuf>,
}

impl CrawlArgs {
    fn config(&self) -> CrawlConfig {
        let mut config = CrawlConfig::default();
        if let Some(seed) = &self.seed {
            config.seed = seed.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(links) = &self.links {
            config.links_path = links.clone();
        }
        if let Some(details) = &self.details {
            config.details_path = details.clone();
        }
        config
    }
}

#[derive(Args)]
struct LexiconArgs {
    /// WordNet dictionary directory (index.* and data.* files)
    #[arg(long, env = "ARMORY_WORDNET")]
    wordnet: Option<PathBuf>,

    /// TOML thesaurus, used when no WordNet directory is given
    #[arg(long, env = "ARMORY_THESAURUS")]
    thesaurus: Option<PathBuf>,
}

enum Lexicon {
    WordNet(PathBuf),
    Thesaurus(PathBuf),
}

impl LexiconArgs {
    fn source(self) -> Result<Lexicon> {
        match (self.wordnet, self.thesaurus) {
            (Some(dir), _) => Ok(Lexicon::WordNet(dir)),
            (None, Some(path)) => Ok(Lexicon::Thesaurus(path)),
            (None, None) => bail!(
                "A synonym source is required. Set ARMORY_WORDNET or use --wordnet (or --thesaurus)"
            ),
        }
    }
}

#[derive(Args)]
struct ForgeArgs {
    /// Output file for the report (default: weapons_<timestamp>.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the length and attribute RNG, for reproducible reports
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Run { crawl, lexicon, forge } => run(crawl, lexicon, forge).await?,
        Commands::Crawl { crawl } => {
            retrieve(&crawl).await?;
        }
        Commands::Extract { details, lexicon, forge } => extract(details, lexicon, forge).await?,
        Commands::Check { url, wiki } => check(&url, &wiki).await?,
    }

    Ok(())
}

async fn run(crawl: CrawlArgs, lexicon: LexiconArgs, forge: ForgeArgs) -> Result<()> {
    println!("⚔️  Armory - premodern weapons from {}\n", crawl.wiki.config().base_url);

    // The lexicon loads while the crawl runs
    let source = lexicon.source()?;
    let vocabulary = tokio::task::spawn_blocking(move || load_vocabulary(source));

    let outcome = retrieve(&crawl).await?;
    let vocabulary = vocabulary.await??;

    forge_report(&outcome.articles, vocabulary, outcome.dropped, forge)
}

async fn extract(details: PathBuf, lexicon: LexiconArgs, forge: ForgeArgs) -> Result<()> {
    if !details.exists() {
        bail!(
            "No article checkpoint at {}. Run `armory crawl` first",
            details.display()
        );
    }

    let source = lexicon.source()?;
    let vocabulary = tokio::task::spawn_blocking(move || load_vocabulary(source));
    let articles = load_articles(&details)?;
    let vocabulary = vocabulary.await??;

    forge_report(&articles, vocabulary, DropStats::default(), forge)
}

async fn retrieve(args: &CrawlArgs) -> Result<CrawlOutcome> {
    let wiki = args.wiki.config();
    let config = args.config();

    println!("🌐 Source: {} | Seed: {}", wiki.base_url, config.seed);
    println!(
        "📁 Checkpoints: {} | {}\n",
        config.links_path.display(),
        config.details_path.display()
    );

    let docs = Arc::new(HttpDocuments::new(wiki)?);
    let crawler = Crawler::new(docs, Arc::new(DiscardMemo::new()), config);
    let outcome = crawler.retrieve_articles().await?;

    if outcome.resumed {
        println!("✅ Loaded {} articles from checkpoint", outcome.articles.len());
    } else {
        if outcome.discarded > 0 {
            println!("{} were discarded", outcome.discarded);
        }
        println!(
            "✅ {} articles from {} confirmed links",
            outcome.articles.len(),
            outcome.confirmed_links
        );
    }

    Ok(outcome)
}

fn load_vocabulary(source: Lexicon) -> Result<Vocabulary> {
    let vocabulary = match source {
        Lexicon::WordNet(dir) => {
            info!("Loading WordNet from {}", dir.display());
            build_vocabulary(WordNet::open(&dir)?)?
        }
        Lexicon::Thesaurus(path) => {
            info!("Loading thesaurus from {}", path.display());
            build_vocabulary(Thesaurus::load(&path)?)?
        }
    };
    Ok(vocabulary)
}

fn forge_report(
    articles: &[RawArticle],
    vocabulary: Vocabulary,
    mut dropped: DropStats,
    args: ForgeArgs,
) -> Result<()> {
    println!(
        "📚 Vocabulary: {} attack terms, {} defense terms",
        vocabulary.attack_terms().len(),
        vocabulary.defense_terms().len()
    );

    let rng = match args.rng_seed {
        Some(seed) => SharedRng::seeded(seed),
        None => SharedRng::from_entropy(),
    };
    let forge = WeaponForge::new(Arc::new(vocabulary), Arc::new(rng));
    let report = forge.forge(articles);

    dropped.merge(&report.dropped);

    let output_path = args.output.unwrap_or_else(default_report_path);
    write_report(&output_path, &report.weapons)?;

    println!("{} were dropped", dropped.total());
    println!("Weapons: {}", report.weapons.len());
    println!("📄 Report saved to: {}", output_path.display());

    Ok(())
}

async fn check(url: &str, args: &WikiArgs) -> Result<()> {
    let path = match url.find(WIKI_PREFIX) {
        Some(start) => &url[start..],
        None => bail!("Not an article link: {}", url),
    };

    let docs = HttpDocuments::new(args.config())?;
    let memo = DiscardMemo::new();
    let mut probe = LinkProbe::new(Link::new(path));

    println!("🔍 Checking {}...", path);
    probe.classify(&memo, &docs).await?;
    println!("{}", probe.link());

    Ok(())
}
