use calculator::RevenueCalculator;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::{CalculatorInputs, InputField};
use presenter::{AnimatedValuePresenter, PresenterSettings};
use rust_decimal::Decimal;
use std::path::PathBuf;
use web_server::format::{format_currency, format_number};

/// The main entry point for the Maalgah landing page application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; everything has a default.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = configuration::load_config(cli.config.as_deref())?;
    let _guard = configuration::init_tracing(&settings.logging)?;

    match cli.command {
        Commands::Serve(args) => {
            if let Some(port) = args.port {
                settings.server.port = port;
            }
            web_server::run_server(&settings).await?;
        }
        Commands::Calculate(args) => {
            let defaults = CalculatorInputs::from(settings.calculator.clone());
            handle_calculate(&args, defaults)?;
        }
        Commands::Animate(args) => {
            handle_animate(&args, settings.animation).await;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Landing page server and revenue calculator for Maalgah AI.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults to ./config.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the landing page and the live calculator.
    Serve(ServeArgs),
    /// Derive the calculator metrics for a scenario and print them.
    Calculate(CalculateArgs),
    /// Print the frames of one revenue animation.
    Animate(AnimateArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct CalculateArgs {
    /// Daily incoming calls (0-300).
    #[arg(long)]
    daily_calls: Option<Decimal>,

    /// Percent of calls after-hours (0-100).
    #[arg(long)]
    after_hours_pct: Option<Decimal>,

    /// Percent of after-hours calls the AI answers (0-100).
    #[arg(long)]
    ai_answer_rate: Option<Decimal>,

    /// Percent of answered calls that become appointments (0-100).
    #[arg(long)]
    conversion_rate: Option<Decimal>,

    /// Revenue per appointment (10-1000).
    #[arg(long)]
    avg_value: Option<Decimal>,

    /// Print the inputs and metrics as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl CalculateArgs {
    fn overrides(&self) -> [(InputField, Option<Decimal>); 5] {
        [
            (InputField::DailyCalls, self.daily_calls),
            (InputField::AfterHoursPct, self.after_hours_pct),
            (InputField::AiAnswerRate, self.ai_answer_rate),
            (InputField::ConversionRate, self.conversion_rate),
            (InputField::AvgValue, self.avg_value),
        ]
    }

    /// Applies the given flags on top of `defaults`, clamping each into its domain.
    fn inputs(&self, defaults: CalculatorInputs) -> CalculatorInputs {
        self.overrides()
            .into_iter()
            .fold(defaults.clamped(), |inputs, (field, value)| match value {
                Some(value) => inputs.with_field(field, value),
                None => inputs,
            })
    }
}

#[derive(Parser)]
struct AnimateArgs {
    /// Value shown before the transition starts.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Value the transition settles on.
    #[arg(long)]
    to: f64,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_calculate(args: &CalculateArgs, defaults: CalculatorInputs) -> anyhow::Result<()> {
    let inputs = args.inputs(defaults);
    let metrics = RevenueCalculator::new().derive(&inputs);

    if args.json {
        let snapshot = events::CalculatorSnapshot { inputs, metrics };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Input", "Value"]);
    for field in InputField::ALL {
        table.add_row(vec![
            field.label().to_string(),
            format!("{} {}", inputs.get(field).normalize(), field.suffix()),
        ]);
    }
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    let rows = [
        ("After-hours calls/day", format_number(metrics.after_hours_calls)),
        ("AI answered/day", format_number(metrics.ai_answered)),
        ("Extra appts/day", format_number(metrics.additional_appointments_daily)),
        ("Extra appts/month", format_number(metrics.additional_appointments_monthly)),
        ("Extra revenue / month", format_currency(metrics.monthly_revenue_increase)),
    ];
    for (title, value) in rows {
        table.add_row(vec![title.to_string(), value]);
    }
    println!("{table}");

    Ok(())
}

async fn handle_animate(args: &AnimateArgs, settings: PresenterSettings) {
    let presenter = AnimatedValuePresenter::spawn(args.from, settings);
    let mut frames = presenter.subscribe();
    frames.borrow_and_update();
    presenter.set_target(args.to);

    let started = tokio::time::Instant::now();
    println!("{:>8}  {}", "ms", "value");
    println!("{:>8}  {}", 0, presenter.displayed());

    // Stop once the final frame is out, or shortly after the duration if the
    // target rounds to what is already displayed.
    let deadline = tokio::time::sleep(settings.duration + settings.frame_interval * 2);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = *frames.borrow_and_update();
                println!("{:>8}  {}", started.elapsed().as_millis(), value);
                if started.elapsed() >= settings.duration && value == args.to.round() as i64 {
                    break;
                }
            }
            _ = &mut deadline => break,
        }
    }

    tracing::debug!(value = presenter.displayed(), "Animation finished.");
    presenter.shutdown().await;
}
