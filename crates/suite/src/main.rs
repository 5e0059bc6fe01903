//! restprobe - run the API suite against the fixture service

use std::path::PathBuf;

use clap::Parser;

use restprobe_suite::runner::TestSuiteResult;
use restprobe_suite::scenario::{catalogue, filter_by_tag};
use restprobe_suite::{SuiteConfig, SuiteContext, Tag, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "restprobe")]
#[command(author, version, about = "API test suite for the users/posts/comments fixture service")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the fixture service
    #[arg(long, env = "RESTPROBE_BASE_URL")]
    base_url: Option<String>,

    /// Run only cases carrying this marker
    #[arg(short, long, value_enum)]
    tag: Option<Tag>,

    /// Run only a specific case by name
    #[arg(short, long, conflicts_with = "tag")]
    name: Option<String>,

    /// List the selected cases instead of running them
    #[arg(long)]
    list: bool,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(2);
        }
    };

    match rt.block_on(run(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<SuiteConfig> {
    let mut config = match &args.config {
        Some(path) => SuiteConfig::from_file(path)?,
        None => SuiteConfig::default(),
    };

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(log_dir) = &args.log_dir {
        config.log_dir = log_dir.clone();
    }

    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let config = load_config(&args)?;

    if args.list {
        let cases = match args.tag {
            Some(tag) => filter_by_tag(&catalogue(), tag),
            None => catalogue(),
        };
        for case in cases {
            let tags: Vec<String> = case
                .tags()
                .iter()
                .map(|t| format!("{:?}", t).to_lowercase())
                .collect();
            println!("{}  [{}]  {}", case.name, tags.join(", "), case.description);
        }
        return Ok(true);
    }

    let context = SuiteContext::init(config, args.verbose)?;
    let runner = TestRunner::new(context);

    let results = if let Some(name) = &args.name {
        let result = runner.run_test(name).await?;
        let duration_ms = result.duration_ms;
        TestSuiteResult::from_results(vec![result], duration_ms)
    } else if let Some(tag) = args.tag {
        runner.run_tagged(tag).await?
    } else {
        runner.run_all().await?
    };

    runner.write_results(&results)?;
    if let Some(log_path) = runner.context().log_path() {
        println!("Log written to: {}", log_path.display());
    }

    Ok(results.failed == 0)
}
