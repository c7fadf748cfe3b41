use anyhow::Context;
use clap::Parser;
use faceguard::commands::{self, RunOptions};
use faceguard::terminal::DirectorySink;
use faceguard::{cli, config, http, input};
use cli::{Cli, Commands};
use config::Config;
use faceguard_common::{Detection, Generation, Restoration, WorkflowController};
use http::HttpTransport;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "faceguard=debug,faceguard_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_options(yes: bool, output: Option<PathBuf>) -> RunOptions {
    RunOptions {
        assume_yes: yes,
        sink: DirectorySink::new(output.unwrap_or_else(|| PathBuf::from("."))),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;
    let api = config.api_config(cli.api_url.as_deref(), cli.timeout);
    tracing::debug!(base_url = %api.base_url, timeout = api.timeout_seconds, "api config");

    match cli.command {
        Commands::Detect { image, model, report, yes, output } => {
            println!("🔍 faceguard - ディープフェイク判別\n");

            let file = input::load_image(&image)?;
            let transport = HttpTransport::new(api.clone())?;
            let controller = WorkflowController::<Detection, _>::new(transport)
                .with_advisory_upload(api.advisory_upload);

            commands::detect(&controller, file, model.into(), report, &run_options(yes, output)).await?;
        }

        Commands::Restore { image, download, yes, output } => {
            println!("🩹 faceguard - 顔画像復元\n");

            let file = input::load_image(&image)?;
            let controller = WorkflowController::<Restoration, _>::new(HttpTransport::new(api.clone())?);
            commands::transform(&controller, file, download, &run_options(yes, output)).await?;
        }

        Commands::Generate { image, download, yes, output } => {
            println!("🎨 faceguard - 顔画像生成\n");

            let file = input::load_image(&image)?;
            let controller = WorkflowController::<Generation, _>::new(HttpTransport::new(api.clone())?);
            commands::transform(&controller, file, download, &run_options(yes, output)).await?;
        }

        Commands::Config { set_api_url, show } => {
            let mut config = config;
            let show = show || set_api_url.is_none();

            if let Some(url) = set_api_url {
                config.set_api_url(&url)?;
                config.save()?;
                println!("✔ APIのURLを設定しました: {}", url.trim().trim_end_matches('/'));
            }

            if show {
                println!("設定:");
                let resolved = config.api_config(cli.api_url.as_deref(), cli.timeout);
                println!("  APIのURL: {}", resolved.base_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  アップロード送信: {}", if config.advisory_upload { "有効" } else { "無効" });
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
