use clap::Parser;
use reel_fetch::config::ServiceConfig;
use reel_fetch::core::chain::{build_http_client, ExtractionChain};
use reel_fetch::domain::model::MediaData;
use reel_fetch::domain::shortcode;
use reel_fetch::utils::logger;
use reel_fetch::utils::validation::Validate;
use std::path::PathBuf;

/// 手動測試各擷取方法是否還能用
#[derive(Debug, Parser)]
#[command(name = "reel-probe")]
#[command(about = "Run the extraction chain against a single Instagram URL")]
struct ProbeArgs {
    /// Instagram post, reel or IGTV URL
    url: String,

    #[arg(long, short, help = "Path to a TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Run every method instead of stopping at the first hit")]
    each: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ProbeArgs::parse();
    logger::init_cli_logger(args.verbose);

    let config = match &args.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::default(),
    };
    config.validate()?;

    let target = shortcode::parse(&args.url)?;
    let client = build_http_client(&config)?;
    let chain = ExtractionChain::from_config(&config, client)?;

    println!("🚀 Probing {} ({:?})", target.shortcode, target.kind);
    println!("📋 Methods: {}", chain.method_names().join(" -> "));

    if args.each {
        for report in chain.run_each(&target).await {
            match report.result {
                Ok(Some(candidate)) => println!(
                    "  ✅ {:<17} {:>6}ms video={} {}",
                    report.method, report.elapsed_ms, candidate.is_video, candidate.video_url
                ),
                Ok(None) => println!("  ➖ {:<17} {:>6}ms nothing found", report.method, report.elapsed_ms),
                Err(e) => println!("  ❌ {:<17} {:>6}ms {}", report.method, report.elapsed_ms, e),
            }
        }
        return Ok(());
    }

    match chain.run(&target).await {
        Some(outcome) => {
            let data = MediaData::new(outcome.candidate, &target.shortcode, target.kind.content_type());
            println!("✅ Resolved by {}", outcome.method);
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        None => {
            println!("❌ All methods failed for {}", target.shortcode);
            std::process::exit(2);
        }
    }

    Ok(())
}
