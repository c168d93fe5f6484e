use super::args::{Cli, Commands};
use super::handlers;
use crate::config::{self, Config};
use crate::types::OutputFormat;
use anyhow::Result;
use odgrid_client::ODataGateway;
use odgrid_types::{DatasetSpec, Gateway};
use tokio::runtime::Runtime;

pub fn run(cli: Cli) -> Result<()> {
    let config_path = config::resolve_config_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    let Some(command) = cli.command else {
        show_guidance(&config);
        return Ok(());
    };

    let dataset = config.resolve_dataset(cli.dataset.as_deref())?;

    // Single-threaded on purpose: every remote call is awaited inline
    // before the next command step, so responses cannot interleave
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if cli.demo {
        let gateway = crate::demo::gateway();
        dispatch(&runtime, &gateway, &config, dataset, command, cli.format)
    } else {
        let gateway = ODataGateway::new(&config.base_url)?;
        dispatch(&runtime, &gateway, &config, dataset, command, cli.format)
    }
}

fn dispatch<G: Gateway>(
    runtime: &Runtime,
    gateway: &G,
    config: &Config,
    dataset: DatasetSpec,
    command: Commands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Datasets => handlers::datasets::handle(config, format),

        Commands::List { sort, filter } => runtime.block_on(handlers::list::handle(
            gateway, &dataset, &sort, &filter, format,
        )),

        Commands::Update { id, set } => runtime.block_on(handlers::update::handle(
            gateway, &dataset, &id, &set, format,
        )),

        Commands::Create { set } => {
            runtime.block_on(handlers::create::handle(gateway, &dataset, &set, format))
        }

        Commands::Delete { id } => {
            runtime.block_on(handlers::delete::handle(gateway, &dataset, &id, format))
        }

        Commands::Export {
            output,
            sort,
            filter,
        } => runtime.block_on(handlers::export::handle(
            gateway, &dataset, output, &sort, &filter,
        )),

        Commands::Browse => handlers::browse::handle(runtime, gateway, dataset),
    }
}

fn show_guidance(config: &Config) {
    println!("odgrid - OData collections as an editable data grid\n");
    println!("Quick commands:");
    println!("  odgrid browse                     # Open the interactive grid");
    println!("  odgrid list                       # Print the dataset's rows");
    println!("  odgrid list --filter ShipCity=London");
    println!("  odgrid export                     # Write the rows to a CSV file");
    println!("  odgrid datasets                   # Show available datasets\n");
    println!("Datasets: {}", config.dataset_names().join(", "));
    println!("\nFor more commands:");
    println!("  odgrid --help");
}
