use clap::Parser;
use movie_cache::core::ConfigProvider;
use movie_cache::utils::{logger, validation::Validate};
use movie_cache::{
    CatalogError, CliConfig, HttpCatalog, MovieCatalog, MovieId, RedisCache, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting movie-cache");

    let result = match &cli.config {
        Some(path) => load_and_run(path, &cli).await,
        None => run(&cli, &cli).await,
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ movie-cache failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

/// 設定檔載入失敗與執行失敗走同一條錯誤路徑
async fn load_and_run(path: &str, cli: &CliConfig) -> Result<(), CatalogError> {
    tracing::info!("📁 Loading configuration from: {}", path);
    let config = TomlConfig::from_file(path)?;
    run(&config, cli).await
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    cli: &CliConfig,
) -> Result<(), CatalogError> {
    config.validate()?;

    let cache = RedisCache::connect(config.cache_url()).await?;
    let source = HttpCatalog::from_config(config);
    let catalog = MovieCatalog::from_config(cache, source, config);

    let ids = catalog.popular_movie_ids().await?;
    let shown = match cli.limit {
        Some(limit) => &ids[..limit.min(ids.len())],
        None => &ids[..],
    };
    println!("{}", serde_json::to_string(shown).unwrap_or_default());

    let wanted: Vec<MovieId> = if cli.ids.is_empty() {
        ids.first().cloned().into_iter().collect()
    } else {
        cli.ids.iter().map(|id| MovieId::from(id.as_str())).collect()
    };

    if wanted.is_empty() {
        tracing::warn!("Listing returned no ids and none were requested");
    }

    for id in &wanted {
        let document = catalog.details_by_id(id).await?;
        println!("{}", render(&document, cli.pretty));
    }

    Ok(())
}

fn render(document: &str, pretty: bool) -> String {
    if !pretty {
        return document.to_string();
    }
    serde_json::from_str::<serde_json::Value>(document)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| document.to_string())
}
