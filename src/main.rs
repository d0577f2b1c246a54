use clap::Parser;
use crash_symbolizer::{cli, config, error, runner, transport};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use transport::HttpTransport;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    log::debug!("config: {:?}", config);

    // --server は今回の実行だけに効かせる
    let server_url = cli.server.clone().unwrap_or_else(|| config.server_url.clone());
    let timeout = config.timeout();
    let http = || HttpTransport::new(&server_url, timeout);

    match cli.command {
        Commands::Submit(args) => {
            eprintln!("🛠  symbolize - {}\n", server_url);
            runner::submit_command(&args, &config, http()?).await?;
        }

        Commands::Logs => {
            runner::logs_command(&config, &http()?).await?;
        }

        Commands::ClearLogs => {
            runner::clear_logs_command(&http()?).await?;
        }

        Commands::Config { set_lang, set_server, set_timeout, show } => {
            if let Some(lang) = set_lang {
                config.set_language(lang)?;
                println!("✔ language: {}", lang.display_name());
            }

            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ server: {}", config.server_url);
            }

            if let Some(seconds) = set_timeout {
                config.timeout_seconds = seconds;
                config.save()?;
                println!("✔ timeout: {}s", seconds);
            }

            if show {
                println!("config: {}", Config::config_path()?.display());
                println!("  server_url: {}", config.server_url);
                println!("  language: {}", config.language);
                println!(
                    "  timeout: {}",
                    match config.timeout() {
                        Some(t) => format!("{}s", t.as_secs()),
                        None => "none".to_string(),
                    }
                );
            }
        }
    }

    Ok(())
}
