use crate::error::{FarmLogError, Result};
use crate::models::{Product, ProductType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "farmlog", version, about = "Farm treatment records and tank-mix checks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the treatments JSON file
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and the treatments file
    Check,
    /// Check whether products can share one tank
    Mix {
        /// Product as NAME:TYPE or NAME:TYPE:DOSAGE
        #[arg(short, long = "product", required = true)]
        products: Vec<String>,

        /// Treat the products as one combined application
        #[arg(short, long)]
        tank_mix: bool,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Per-culture treatment statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Chronological treatment events for one culture
    Timeline {
        culture: String,

        #[arg(long)]
        json: bool,
    },
    /// List the active compatibility rules and checks
    Rules,
}

/// Parse a `NAME:TYPE[:DOSAGE]` product argument.
pub fn parse_product_arg(arg: &str) -> Result<Product> {
    let mut parts = arg.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let type_str = parts.next().unwrap_or_default();

    if name.is_empty() {
        return Err(FarmLogError::InvalidData(format!(
            "product '{}' has no name",
            arg
        )));
    }

    let product_type = ProductType::from_str(type_str).ok_or_else(|| {
        FarmLogError::InvalidData(format!(
            "unknown product type '{}' for {} (expected one of: {})",
            type_str,
            name,
            ProductType::all()
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let product = Product::new(name, product_type);
    Ok(match parts.next() {
        Some(dosage) => product.with_dosage(dosage.trim()),
        None => product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_arg_with_and_without_dosage() {
        let p = parse_product_arg("Score:fungicide:0.2 l/ha").unwrap();
        assert_eq!(p.name, "Score");
        assert_eq!(p.product_type, Some(ProductType::Fungicide));
        assert_eq!(p.dosage, "0.2 l/ha");

        let p = parse_product_arg("Moddus:growth regulator").unwrap();
        assert_eq!(p.product_type, Some(ProductType::GrowthRegulator));
        assert!(p.dosage.is_empty());
    }

    #[test]
    fn product_arg_errors() {
        assert!(parse_product_arg("Score").is_err());
        assert!(parse_product_arg("Score:plasma").is_err());
        assert!(parse_product_arg(":fungicide").is_err());
    }

    #[test]
    fn parses_mix_command() {
        let cli = Cli::parse_from([
            "farmlog",
            "-v",
            "mix",
            "--tank-mix",
            "-p",
            "Score:fungicide:0.2 l/ha",
            "-p",
            "Karate:insecticide",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Mix {
                products,
                tank_mix,
                json,
            } => {
                assert_eq!(products.len(), 2);
                assert!(tank_mix);
                assert!(!json);
            }
            _ => panic!("expected mix command"),
        }
    }

    #[test]
    fn parses_timeline_with_data_override() {
        let cli = Cli::parse_from(["farmlog", "--data", "t.json", "timeline", "apple", "--json"]);
        assert_eq!(cli.data, Some(PathBuf::from("t.json")));
        assert!(matches!(cli.command, Commands::Timeline { json: true, .. }));
    }
}
