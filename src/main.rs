use clap::Parser;
use log::info;
use std::process;
use subprobe::{Args, SubprobeEngine};

const BANNER: &str = r#"
           _                         _
 ___ _   _| |__  _ __  _ __ ___   __| |__   ___
/ __| | | | '_ \| '_ \| '__/ _ \ / _` '_ \ / _ \
\__ \ |_| | |_) | |_) | | | (_) | (_| |_) |  __/
|___/\__,_|_.__/| .__/|_|  \___/ \__,_.__/ \___|
                |_|
        Wordlist-driven subdomain enumeration
"#;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if !args.silent {
        println!("{}", BANNER);
    }

    if let Err(e) = run(&args).await {
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
}

async fn run(args: &Args) -> Result<(), subprobe::SubprobeError> {
    let engine = SubprobeEngine::new(args)?;
    let stats = engine.run().await?;

    info!(
        "Enumeration completed: {} of {} candidates resolved in {:.2}s",
        stats.found,
        stats.attempted,
        stats.duration.as_secs_f64()
    );
    Ok(())
}
