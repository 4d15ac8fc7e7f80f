use anyhow::{bail, Context};
use clap::Parser;
use farmlog::cli::{parse_product_arg, Cli, Commands};
use farmlog::config::Config;
use farmlog::logic::{AnalyticsAggregator, CompatibilityEngine};
use farmlog::models::{CompatibilityVerdict, Culture, CultureStats, CultureTimeline, Treatment};
use farmlog::store::TreatmentStore;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = Config::load(cli.config.clone()).context("loading configuration")?;
    let data_file = cli
        .data
        .clone()
        .unwrap_or_else(|| config.data.treatments_file.clone());
    let store = TreatmentStore::new(data_file);
    let engine = CompatibilityEngine::from_config(&config.compatibility);
    let aggregator = AnalyticsAggregator;

    match cli.command {
        Commands::Init => {}
        Commands::Check => run_check(&store, &engine)?,
        Commands::Mix {
            products,
            tank_mix,
            json,
        } => {
            let products = products
                .iter()
                .map(|arg| parse_product_arg(arg))
                .collect::<farmlog::Result<Vec<_>>>()?;
            let verdict = engine.evaluate(&products, tank_mix);
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                print_verdict(&verdict);
            }
        }
        Commands::Stats { json } => {
            let treatments = load(&store)?;
            let stats = aggregator.culture_stats(&treatments);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
        Commands::Timeline { culture, json } => {
            let Some(culture) = Culture::from_str(&culture) else {
                bail!("unknown culture '{}'", culture);
            };
            let treatments = load(&store)?;
            let timeline = aggregator.timeline(&treatments, culture);
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
            } else {
                print_timeline(&timeline);
            }
        }
        Commands::Rules => print_rules(&engine),
    }

    Ok(())
}

fn load(store: &TreatmentStore) -> anyhow::Result<Vec<Treatment>> {
    store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))
}

fn run_check(store: &TreatmentStore, engine: &CompatibilityEngine) -> anyhow::Result<()> {
    println!("Config: OK ({} compatibility rules)", engine.table().len());

    let treatments = load(store)?;
    println!(
        "Treatments: {} loaded from {}",
        treatments.len(),
        store.path().display()
    );

    let mut issues = 0;
    for treatment in &treatments {
        for issue in treatment.consistency_issues() {
            println!("  #{} ({}): {}", treatment.id, treatment.culture, issue);
            issues += 1;
        }

        for finding in engine.explain_treatment(treatment) {
            println!(
                "  #{} ({}): tank mix {} [{}]: {}",
                treatment.id, treatment.culture, finding.level, finding.check_id, finding.message
            );
            issues += 1;
        }
    }

    if issues == 0 {
        println!("No issues found");
    }
    Ok(())
}

fn print_verdict(verdict: &CompatibilityVerdict) {
    match &verdict.message {
        Some(message) => println!("{} {}: {}", verdict.level.symbol(), verdict.level, message),
        None => println!("{} compatible", verdict.level.symbol()),
    }
}

fn print_stats(stats: &[CultureStats]) {
    if stats.is_empty() {
        println!("No treatments recorded");
        return;
    }

    for s in stats {
        println!(
            "{:<12} total {:>3}  done {:>3} ({})  planned {:>3}  last {}",
            s.culture.as_str(),
            s.total_treatments,
            s.completed_treatments,
            s.completion_rate()
                .map(|r| format!("{:.0}%", r * 100.0))
                .unwrap_or_else(|| "-".into()),
            s.planned_treatments,
            s.last_treatment
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
        );
        if !s.products_used.is_empty() {
            let products: Vec<&str> = s.products_used.iter().map(String::as_str).collect();
            println!("             products: {}", products.join(", "));
        }
        if s.tank_mix_count > 0 {
            let mixes = s.tank_mix_labels();
            if mixes.is_empty() {
                println!("             tank mixes: {}", s.tank_mix_count);
            } else {
                println!(
                    "             tank mixes: {} ({})",
                    s.tank_mix_count,
                    mixes.join("; ")
                );
            }
        }
    }
}

fn print_timeline(timeline: &CultureTimeline) {
    if timeline.is_empty() {
        println!("No treatments for {}", timeline.culture);
        return;
    }

    for event in &timeline.treatments {
        let status = if event.completed { "done" } else { "planned" };
        println!(
            "{}  {:<8} #{:<5} {:<16} {}",
            event.date,
            status,
            event.treatment_id,
            event.kind,
            event.products.join(", ")
        );
    }
}

fn print_rules(engine: &CompatibilityEngine) {
    println!("Checks:");
    for (id, name) in engine.list_checks() {
        println!("  {:<16} {}", id, name);
    }

    println!("Rules:");
    for rule in engine.table().rules() {
        let mark = if rule.compatible { "ok " } else { "NO " };
        println!(
            "  {} {} + {}: {}",
            mark, rule.type_a, rule.type_b, rule.notes
        );
    }
}
