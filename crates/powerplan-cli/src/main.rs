use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use powerplan_cli::input::InputArgs;
use powerplan_cli::output::{render_json, render_merit, render_plan, OutputFormat};
use powerplan_cli::terminal::ColorPalette;
use powerplan_lib::{rank_units, run_dispatch, DispatchConfig, PlanSummary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Merit-order production plan utilities")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// Leave the CO2 allowance cost out of gas-fired merit.
    #[arg(long, global = true)]
    no_co2: bool,

    /// CO2 emitted per MWh of gas-fired output, in tons.
    #[arg(long, global = true, value_name = "TONS")]
    co2_intensity: Option<f64>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the production plan for a load.
    Plan {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show units in merit order with their effective bounds.
    Merit {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let config = dispatch_config(&cli.global)?;
    match cli.command {
        Command::Plan { input, format } => handle_plan(&input, format, &config),
        Command::Merit { input, format } => handle_merit(&input, format, &config),
    }
}

fn dispatch_config(options: &GlobalOptions) -> Result<DispatchConfig> {
    let mut config = DispatchConfig::from_env();
    if options.no_co2 {
        config = config.with_co2(false);
    }
    if let Some(intensity) = options.co2_intensity {
        config = config.with_co2_intensity(intensity);
    }
    config.validate().context("invalid dispatch configuration")?;
    Ok(config)
}

fn handle_plan(input: &InputArgs, format: OutputFormat, config: &DispatchConfig) -> Result<()> {
    let request = input.load_request()?;
    let result = run_dispatch(&request, config)
        .with_context(|| format!("no feasible plan for load {} MW", request.load))?;

    match format {
        OutputFormat::Text => {
            let summary = PlanSummary::from_dispatch(&result);
            print!("{}", render_plan(&summary, &ColorPalette::detect()));
        }
        OutputFormat::Json => println!("{}", render_json(result.plan.entries())?),
    }
    Ok(())
}

fn handle_merit(input: &InputArgs, format: OutputFormat, config: &DispatchConfig) -> Result<()> {
    let request = input.load_request()?;
    let entries = rank_units(&request.units, &request.fuels, config);

    match format {
        OutputFormat::Text => print!("{}", render_merit(&entries, &ColorPalette::detect())),
        OutputFormat::Json => println!("{}", render_json(&entries)?),
    }
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
