use clap::{Args, Parser, Subcommand};
use sitegen::config::{self, BuildConfig, Overrides};
use sitegen::markdown::CommonMark;
use sitegen::{build, output, template};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(version)]
#[command(about = "Static site generator for markdown trees")]
#[command(long_about = "\
Static site generator for markdown trees

Every markdown file under the content directory becomes an HTML page: its
first '# ' heading fills {{ Title }} and the converted document fills
{{ Content }} in the page template. The static directory is then copied
over the result.

Layout (defaults, all configurable in sitegen.toml):

  sitegen.toml          # Optional config ('sitegen gen-config' prints one)
  template.html         # Page template ('sitegen gen-template' prints one)
  content/
  ├── index.md          # → docs/index.html
  ├── notes.txt         # skipped
  └── blog/
      └── first.md      # → docs/blog/first.html
  static/
  └── index.css         # → docs/index.css (copied last, wins collisions)

Run without a subcommand to build. 'sitegen site' writes to site/docs.")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    build: BuildArgs,
}

/// Options shared by every command. Accepted before or after the subcommand.
#[derive(Args, Clone, Debug)]
struct CommonArgs {
    /// Config file (default: sitegen.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content directory
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Static asset directory
    #[arg(long, global = true)]
    static_dir: Option<PathBuf>,

    /// Page template file
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Output directory name (placed under BASE_PATH when given)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Clone, Debug)]
struct BuildArgs {
    /// Prefix for the destination root: pages go to BASE_PATH/docs
    base_path: Option<PathBuf>,

    /// Print the build report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate pages and copy static assets (the default)
    Build(BuildArgs),
    /// Validate titles and template without writing anything
    Check,
    /// Print a stock sitegen.toml with all options documented
    GenConfig,
    /// Print a minimal template.html with both placeholders
    GenTemplate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Build(cli.build));

    let result = match command {
        Command::Build(args) => run_build(&cli.common, args),
        Command::Check => run_check(&cli.common),
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
        Command::GenTemplate => {
            println!("{}", template::stock_template());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_build(common: &CommonArgs, args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(common.verbose);
    let config = load_config(common, args.base_path)?;
    if config.build.parallel {
        init_thread_pool(&config.build);
    }

    let converter = CommonMark::new(&config.markdown);
    let report = build::build(&config, &converter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_build_output(&report, &config.content_dir);
    }
    Ok(())
}

fn run_check(common: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(common.verbose);
    let config = load_config(common, None)?;
    println!("==> Checking {}", config.content_dir.display());
    let report = build::check(&config)?;
    output::print_check_output(&report, &config.content_dir);
    Ok(())
}

/// Load the config file and apply command-line overrides on top.
fn load_config(
    common: &CommonArgs,
    base_path: Option<PathBuf>,
) -> Result<BuildConfig, config::ConfigError> {
    let mut config = config::load_config(common.config.as_deref())?;
    config.apply(Overrides {
        content_dir: common.content.clone(),
        static_dir: common.static_dir.clone(),
        template: common.template.clone(),
        output_dir: common.output.clone(),
        base_path,
    });
    config.validate()?;
    Ok(config)
}

/// Install the stderr log subscriber.
///
/// `--verbose` enables INFO, otherwise `RUST_LOG` is honoured and the
/// default is WARN.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on build config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(options: &config::BuildOptions) {
    let threads = config::effective_threads(options);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
