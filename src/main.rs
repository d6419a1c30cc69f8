use clap::{Parser, ValueEnum};
use log::{error, info};
use ovb_sim::config::SimulationConfig;
use ovb_sim::{OvbError, Scenario};
use std::path::PathBuf;
use std::process;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScenarioSelection {
    Correlated,
    Independent,
    All,
}

impl ScenarioSelection {
    fn matches(self, name: &str) -> bool {
        match self {
            ScenarioSelection::All => true,
            ScenarioSelection::Correlated => name == "correlated",
            ScenarioSelection::Independent => name == "independent",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "ovb-sim",
    version,
    about = "Demonstrates omitted-variable bias by simulating correlated regressors and fitting OLS models."
)]
struct Args {
    /// TOML file describing the scenarios; defaults to the built-in pair.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Which scenario(s) to run.
    #[clap(long, value_enum, default_value = "all")]
    scenario: ScenarioSelection,

    /// Directory to write SVG correlation figures into.
    #[clap(long)]
    plot_dir: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), OvbError> {
    let config = match &args.config {
        Some(path) => {
            info!("loading scenarios from {}", path.display());
            SimulationConfig::from_path(path)?
        }
        None => SimulationConfig::default(),
    };

    let selected: Vec<_> = config
        .scenarios
        .iter()
        .filter(|s| args.scenario.matches(&s.name))
        .collect();
    if selected.is_empty() {
        info!("no scenario matches {:?}", args.scenario);
    }

    for scenario_config in selected {
        let report = Scenario::from_config(scenario_config)?.run()?;
        println!("{report}");
        if let Some(dir) = &args.plot_dir {
            let written = report.write_figures(dir)?;
            info!("scenario '{}': wrote {} figures", report.name(), written.len());
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}
