use clap::Parser;

use architect::generator::{BlueprintGenerator, EngineType, GeneratorConfig, GeneratorFactory};
use architect::server::{BlueprintGateway, GatewayConfig};

#[derive(Parser)]
#[command(name = "architect-gateway")]
#[command(version)]
#[command(about = "HTTP gateway for the automation blueprint engines")]
struct Cli {
    /// Address the gateway listens on.
    #[arg(long, env = "ARCHITECT_BIND_ADDR", default_value = "127.0.0.1:8090")]
    bind_addr: String,

    /// Engine configuration file (TOML). Without it the environment decides.
    #[arg(long)]
    config: Option<String>,

    /// Engine override: rules, llm or delegating.
    #[arg(long)]
    engine: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if let Err(e) = serve(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(cli: Cli) -> Result<(), String> {
    let mut engine_config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path).map_err(|e| format!("{}", e))?,
        None => GeneratorConfig::from_env().map_err(|e| format!("{}", e))?,
    };

    if let Some(engine) = &cli.engine {
        engine_config.engine_type = match engine.as_str() {
            "rules" => EngineType::Rules,
            "llm" => EngineType::Llm,
            "delegating" => EngineType::Delegating,
            other => {
                return Err(format!(
                    "invalid engine '{}', use rules, llm or delegating",
                    other
                ))
            }
        };
    }

    let generator: Box<dyn BlueprintGenerator> = GeneratorFactory::create_generator(engine_config)
        .await
        .map_err(|e| format!("{}", e))?;

    println!("[Gateway] Engine: {}", generator.name());
    println!("[Gateway] Listening on {}", cli.bind_addr);

    let config = GatewayConfig {
        bind_addr: cli.bind_addr,
    };
    BlueprintGateway::start(config, generator)
        .await
        .map_err(|e| format!("{}", e))
}
