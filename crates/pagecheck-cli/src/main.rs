use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pagecheck_cli::OutputFormat;
use pagecheck_cli::commands::{self, CheckOptions};

#[derive(Parser)]
#[command(name = "pagecheck")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for timing web pages and auditing their on-page SEO",
    long_about = "pagecheck fetches a page once, times the exchange, and reports a performance \
                  grade together with an on-page SEO score, issues and recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Timeout in seconds for performance checks
    #[arg(long, global = true, env = "PAGECHECK_PERF_TIMEOUT", default_value_t = 30)]
    perf_timeout: u64,

    /// Timeout in seconds for SEO analysis
    #[arg(long, global = true, env = "PAGECHECK_SEO_TIMEOUT", default_value_t = 20)]
    seo_timeout: u64,

    /// Override the User-Agent sent with every request
    #[arg(long, global = true, env = "PAGECHECK_USER_AGENT")]
    user_agent: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure time to first byte and total load time
    Ttfb {
        /// Page URL (https:// is assumed when no scheme is given)
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Quick health check: status class, timings and grade
    Health {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Check up to 10 URLs concurrently
    Batch {
        /// Page URLs, reported in the order given
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,
    },

    /// Detailed performance report with headers and benchmarks
    Report {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Full on-page SEO analysis
    Seo {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Brief SEO health summary
    SeoQuick {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Meta tag and social media tag analysis
    MetaTags {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Resolve a perf://check/{url} or seo://analyze/{url} URI to JSON
    Resource {
        #[arg(value_name = "URI")]
        uri: String,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  \
        bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  \
        bash:  pagecheck completion --shell bash >> ~/.bashrc\n  \
        zsh:   pagecheck completion --shell zsh >> ~/.zshrc\n  \
        fish:  pagecheck completion --shell fish > ~/.config/fish/completions/pagecheck.fish")]
    Completion {
        /// Target shell
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let options = CheckOptions {
        perf_timeout: cli.perf_timeout,
        seo_timeout: cli.seo_timeout,
        user_agent: cli.user_agent.clone(),
    };
    let format = cli.format;

    match cli.command {
        Commands::Ttfb { url } => commands::ttfb::execute(&url, &options, format),
        Commands::Health { url } => commands::health::execute(&url, &options, format),
        Commands::Batch { urls } => commands::batch::execute(&urls, &options, format),
        Commands::Report { url } => commands::report::execute(&url, &options, format),
        Commands::Seo { url } => commands::seo::execute(&url, &options, format),
        Commands::SeoQuick { url } => commands::seo_quick::execute(&url, &options, format),
        Commands::MetaTags { url } => commands::meta_tags::execute(&url, &options, format),
        Commands::Resource { uri } => commands::resource::execute(&uri, &options),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pagecheck=debug,pagecheck_cli=debug,pagecheck_core=debug")
    } else {
        EnvFilter::new("pagecheck=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
