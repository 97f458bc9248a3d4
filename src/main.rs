use clap::Parser;
use futures_util::future::join_all;
use neurolife::config::Config;
use neurolife::simulation::SimulationState;
use neurolife::stats::{AggregateStatistics, RunStatistics};

#[derive(Parser, Debug)]
#[command(name = "neurolife")]
#[command(about = "Neural life simulator", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Write the per-run and aggregate statistics to this JSON file.
    #[arg(short, long)]
    output: Option<String>,

    /// Override the number of parallel simulation runs.
    #[arg(long)]
    runs: Option<usize>,

    /// Override the tick budget per run.
    #[arg(long)]
    max_ticks: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        log::info!("Loading config from: {}", args.config);
        Config::load_from_file(&args.config)?
    } else {
        log::info!(
            "Config file not found, using defaults and saving to: {}",
            args.config
        );
        let config = Config::default();
        config.save_to_file(&args.config)?;
        config
    };

    if let Some(runs) = args.runs {
        config.simulation.runs = runs;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.simulation.max_ticks = max_ticks;
    }
    config.validate()?;

    log::info!(
        "Starting {} runs of up to {} ticks on a {}x{} world",
        config.simulation.runs,
        config.simulation.max_ticks,
        config.world.width,
        config.world.height
    );

    let mut handles = Vec::with_capacity(config.simulation.runs);
    for id in 1..=config.simulation.runs {
        let config = config.clone();
        // Simulation errors are carried across the thread boundary as
        // strings; the causes are all setup problems with clear messages.
        handles.push(tokio::task::spawn_blocking(move || -> Result<RunStatistics, String> {
            let mut sim = SimulationState::new(id, &config).map_err(|e| e.to_string())?;
            let stats = sim.run(&config);

            if log::log_enabled!(log::Level::Debug) {
                if let Some(survivor) = sim.world.organisms().next() {
                    let snapshot =
                        serde_json::to_string(&survivor.brain.snapshot()).unwrap_or_default();
                    log::debug!("sim {} survivor {} brain: {}", id, survivor.id, snapshot);
                }
            }

            Ok(stats)
        }));
    }

    let mut runs = Vec::with_capacity(handles.len());
    for result in join_all(handles).await {
        runs.push(result??);
    }

    for run in &runs {
        log::info!(
            "sim {} finished | ticks {} | survivors {}/{} | avg energy {:.2}",
            run.simulation_id,
            run.ticks,
            run.final_organisms,
            run.initial_organisms,
            run.average_energy
        );
    }

    let aggregate = AggregateStatistics::compute(&runs);
    log::info!(
        "aggregate | {} runs | {} ticks | survival rate {:.2}% | avg energy {:.2}",
        aggregate.simulations,
        aggregate.total_ticks,
        aggregate.average_survival_rate * 100.0,
        aggregate.average_energy
    );

    if let Some(path) = &args.output {
        let report = serde_json::json!({
            "runs": runs,
            "aggregate": aggregate,
        });
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        log::info!("Report written to: {}", path);
    }

    Ok(())
}
