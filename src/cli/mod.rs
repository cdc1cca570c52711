//! CLI module for geointel

mod args;

pub use args::{Args, Command};

use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use crate::dashboard::Dashboard;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::filter::LayerSet;
use crate::intel::Analyst;
use crate::llm::{build_generator, Generator};
use crate::model::{IntelligenceLayer, IntelligencePoint};
use crate::output::{write_briefing, Briefing};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    if let Command::Version = args.command {
        println!("geointel {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut cfg = load_config(args.config.as_deref())?;

    let (format, output, layers) = match &args.command {
        Command::Export { format, output, .. } => (format.clone(), output.clone(), Vec::new()),
        Command::Show { layers, .. } => (None, None, layers.clone()),
        _ => (None, None, Vec::new()),
    };
    if let Some(fmt) = &format {
        if OutputFormat::parse(fmt).is_none() {
            return Err(Error::Other(format!("Unknown format: {}", fmt)));
        }
    }
    cfg.merge_cli(output, format, args.dataset.clone(), args.offline);

    let level = if args.verbose { "debug" } else { cfg.logging.level.as_str() };
    crate::logging::init(level)?;

    let dataset = match &cfg.dataset.path {
        Some(path) => Dataset::load(path)?,
        None => Dataset::builtin(),
    };

    let initial_layers: LayerSet = if layers.is_empty() {
        cfg.display.layers.iter().copied().collect()
    } else {
        layers
            .iter()
            .map(|l| l.parse::<IntelligenceLayer>())
            .collect::<Result<_>>()?
    };

    let generator = build_generator(&cfg.model)?;
    tracing::debug!(generator = generator.name(), model = %cfg.model.model, "session starting");

    let mut dashboard = Dashboard::new(dataset, Analyst::new(generator)).with_layers(initial_layers);
    dashboard.set_search(cfg.display.search.clone());

    match args.command {
        Command::Layers => {
            print_layers(&dashboard);
            Ok(())
        }

        Command::Show { search, json, .. } => {
            if let Some(term) = search {
                dashboard.set_search(term);
            }
            let visible = dashboard.visible();
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
                return Ok(());
            }

            for point in &visible.points {
                print_point_line(point);
            }
            for route in &visible.routes {
                println!(
                    "{:<16} {:<28} {} ({} vértices)",
                    IntelligenceLayer::Routes.as_str(),
                    route.id,
                    route.name,
                    route.path.len()
                );
            }
            println!("\n{} visible features", visible.len());
            Ok(())
        }

        Command::Inspect { id, json } => {
            let point = dashboard.select_id(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(point)?);
            } else {
                print_point_detail(point);
            }
            Ok(())
        }

        Command::Analyze { json } => {
            let spinner = spinner("Sintetizando inteligencia...");
            let summary = dashboard.request_analysis();
            spinner.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(summary)?);
            } else {
                println!("Riesgo: {}\n", summary.risk_level.as_str());
                println!("{}\n", summary.overview);
                for insight in &summary.key_insights {
                    println!("  - {}", insight);
                }
            }
            Ok(())
        }

        Command::Predict { json } => {
            let spinner = spinner("Proyectando misiones...");
            let predictions = dashboard.request_predictions();
            spinner.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(predictions)?);
                return Ok(());
            }
            if predictions.is_empty() {
                println!("No mission projections");
            }
            for prediction in predictions {
                println!(
                    "{:<28} {} ({:.0}%) [{:.2}, {:.2}] {}",
                    prediction.point.id,
                    prediction.point.name,
                    prediction.confidence * 100.0,
                    prediction.point.lat,
                    prediction.point.lng,
                    prediction.time_window
                );
            }
            Ok(())
        }

        Command::Sdrga { json } => {
            let spinner = spinner("Detectando repliegues...");
            let alerts = dashboard.request_sdrga();
            spinner.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(alerts)?);
                return Ok(());
            }
            if alerts.is_empty() {
                println!("No SDRGA alerts");
            }
            for alert in alerts {
                println!(
                    "{:<8} {:>5.1} {} -> [{:.2}, {:.2}]",
                    alert.risk_level.as_str(),
                    alert.risk_score,
                    alert.point.name,
                    alert.probable_destination.lat,
                    alert.probable_destination.lng
                );
            }
            Ok(())
        }

        Command::Export { with_model, .. } => {
            if with_model {
                let spinner = spinner("Consultando el modelo...");
                dashboard.request_predictions();
                dashboard.request_sdrga();
                dashboard.request_analysis();
                spinner.finish_and_clear();
            }

            let briefing = Briefing::from_dashboard(&dashboard, Utc::now());
            let path = write_briefing(&briefing, &cfg.output)?;
            println!("Briefing written to: {}", path.display());
            Ok(())
        }

        Command::Version => Ok(()),
    }
}

/// Explicit `--config` must load; the default file is optional
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::PathNotFound(path.to_path_buf()));
            }
            Config::load(path)
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Config::load(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_layers<G: Generator>(dashboard: &Dashboard<G>) {
    for layer in IntelligenceLayer::ALL {
        let marker = if dashboard.layers().is_enabled(layer) { "*" } else { " " };
        let count = if layer.is_generated() {
            "-".to_string()
        } else {
            dashboard.dataset().count(layer).to_string()
        };
        println!("{} {:<16} {:>3}  {}", marker, layer.as_str(), count, layer.label());
    }
}

fn print_point_line(point: &IntelligencePoint) {
    println!(
        "{:<16} {:<28} {} [{:.2}, {:.2}]",
        point.category.as_str(),
        point.id,
        point.name,
        point.lat,
        point.lng
    );
}

fn print_point_detail(point: &IntelligencePoint) {
    println!("{}", point.name);
    println!("  id:       {}", point.id);
    println!("  type:     {}", point.kind);
    println!("  layer:    {}", point.category.label());
    println!("  position: {:.4}, {:.4}", point.lat, point.lng);
    if let Some(date) = &point.date {
        println!("  date:     {}", date);
    }
    if let Some(source) = &point.source {
        println!("  source:   {}", source);
    }
    if !point.commanders.is_empty() {
        println!("  commanders: {}", point.commanders.join(", "));
    }
    if !point.influence_zones.is_empty() {
        println!("  zones:    {}", point.influence_zones.join(", "));
    }
    if !point.illegal_economy.is_empty() {
        println!("  economy:  {}", point.illegal_economy.join(", "));
    }
    if !point.tactics.is_empty() {
        println!("  tactics:  {}", point.tactics.join(", "));
    }
    println!("\n{}", point.description);
    if let Some(history) = &point.historical_context {
        println!("\n{}", history);
    }
}
