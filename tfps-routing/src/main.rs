use clap::{Parser, Subcommand};
use std::path::Path;
use tfps_routing::{
    app::{RouteFacade, RoutingCliError},
    config::RoutingConfiguration,
    model::graph::NodeId,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct RoutingAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// find the k cheapest routes between two approaches at a time of day
    Route {
        #[arg(long, help = "path to .toml or .json file with routing parameters")]
        config: Option<String>,
        #[arg(long, help = "origin approach as <site>-<approach>, e.g. 970-1")]
        origin: String,
        #[arg(long, help = "destination approach as <site>-<approach>, e.g. 2000-3")]
        destination: String,
        #[arg(long, help = "time of day as HH:MM")]
        time: String,
        #[arg(long, help = "number of routes, defaults to default_k of the configuration")]
        k: Option<usize>,
    },
    /// sample travel times for all 96 time slots and write them as a cache file
    Generate {
        #[arg(long, help = "path to .toml or .json file with routing parameters")]
        config: Option<String>,
        #[arg(long, help = "output path for the travel time CSV")]
        output_file: String,
    },
}

fn read_configuration(config: Option<&String>) -> Result<RoutingConfiguration, RoutingCliError> {
    let conf = match config {
        None => RoutingConfiguration::default(),
        Some(f) => {
            log::info!("reading routing configuration from {f}");
            RoutingConfiguration::try_from(f)?
        }
    };
    Ok(conf)
}

fn parse_node(value: &str) -> Result<NodeId, RoutingCliError> {
    value.parse::<NodeId>().map_err(RoutingCliError::ArgumentError)
}

pub fn run(app: &App) -> Result<(), RoutingCliError> {
    env_logger::init();
    match app {
        App::Route {
            config,
            origin,
            destination,
            time,
            k,
        } => {
            let conf = read_configuration(config.as_ref())?;
            let origin = parse_node(origin)?;
            let destination = parse_node(destination)?;
            let mut facade = RouteFacade::try_from(&conf)?;
            let routes =
                facade.route_between(&origin, &destination, time, k.unwrap_or(conf.default_k))?;
            if routes.is_empty() {
                log::warn!("no route from '{origin}' to '{destination}' at {time}");
            }
            println!("{}", serde_json::to_string_pretty(&routes)?);
            Ok(())
        }
        App::Generate {
            config,
            output_file,
        } => {
            let conf = read_configuration(config.as_ref())?;
            let mut facade = RouteFacade::try_from(&conf)?;
            match facade.generate_travel_times_file(Path::new(output_file)) {
                Ok(_) => {
                    eprintln!("finished.");
                    Ok(())
                }
                Err(e) => {
                    log::error!("tfps-routing failed: {e}");
                    Err(e)?
                }
            }
        }
    }
}

fn main() {
    let args = RoutingAppArguments::parse();
    if let Err(e) = run(&args.app) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
