use clap::{Parser, ValueEnum};
use daily_briefing::{Agent, AppConfig, OrchestratorAgent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// Full briefing through the orchestrator
    Briefing,
    /// News agent only
    News,
    /// Weather agent only
    Weather,
}

#[derive(Parser)]
#[command(name = "daily-briefing")]
#[command(about = "Weather and news briefings from a natural-language request", long_about = None)]
#[command(version)]
struct Cli {
    /// Which agent answers the request
    #[arg(short, long, value_enum, default_value_t = Target::Briefing)]
    agent: Target,

    /// Run the briefing pipeline once, without retries or the pipeline timeout
    #[arg(long)]
    no_recovery: bool,

    /// The request, e.g. "good morning, weather in Pune and tech news"
    #[arg(required = true)]
    request: Vec<String>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let request = cli.request.join(" ");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let orchestrator = match OrchestratorAgent::new(&config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let response = match cli.agent {
        Target::Briefing if cli.no_recovery => Ok(orchestrator.process_request(&request).await),
        Target::Briefing => orchestrator.call(&request).await,
        Target::News => orchestrator.news_agent().call(&request).await,
        Target::Weather => orchestrator.weather_agent().call(&request).await,
    };

    match response {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
