use anyhow::Context;
use clap::Parser;
use fault_demo::core::runner::select_routines;
use fault_demo::utils::{logger, validation::Validate};
use fault_demo::{CliConfig, FaultDemoRunner, OutputFormat, ROUTINES};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    if cli.list {
        for entry in ROUTINES.iter() {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    let config = cli.load_demo_config().with_context(|| match &cli.config {
        Some(path) => format!("Failed to load config file '{}'", path.display()),
        None => "Failed to load default configuration".to_string(),
    })?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e).context("Invalid configuration");
    }
    tracing::debug!("Demo config: {:?}", config);

    let routines = select_routines(&cli.only)?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let runner = FaultDemoRunner::local(config).with_format(format);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner.run_routines(&routines, &mut out)?;

    Ok(())
}
