use clap::Parser;
use strava_trmnl::core::ConfigProvider;
use strava_trmnl::utils::{logger, validation::Validate};
use strava_trmnl::{CliConfig, EnvConfig, EtlEngine, EtlError, Goals, GoalsPipeline};
use strava_trmnl::{LocalStorage, StdinPrompt};

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Goal sync failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    // .env 不存在時忽略
    dotenv::dotenv().ok();
    let config = CliConfig::parse();

    // 初始化日誌
    if std::env::var_os("CI").is_some() {
        logger::init_ci_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting strava-trmnl");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    let env = match EnvConfig::from_env().and_then(|env| env.validate().map(|_| env)) {
        Ok(env) => env,
        Err(e) => fail(&e),
    };
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let goals = match Goals::from_file(config.goals_path()) {
        Ok(goals) => goals,
        Err(e) => fail(&e),
    };
    tracing::info!(
        "🎯 Goals: {} km/week, {} km/year",
        goals.weekly,
        goals.yearly
    );

    let storage = LocalStorage::new(".");
    let prompt = StdinPrompt::new(config.open_browser());
    let pipeline = GoalsPipeline::new(storage, config, &env, goals, prompt);

    if let Err(e) = pipeline.seed_credentials_from_env(&env).await {
        fail(&e);
    }

    let engine = EtlEngine::new(pipeline);
    match engine.run().await {
        Ok(_) => {
            tracing::info!("✅ Goal sync completed successfully!");
        }
        Err(e) => fail(&e),
    }
}
