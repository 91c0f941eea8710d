//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use kupon_core::{FoodItem, OutletInfo};

/// Issue coupon redemption codes at the counter.
#[derive(Debug, Parser)]
#[command(name = "kupon-kiosk", version, about)]
pub struct Cli {
    /// Path to kupon.toml (defaults to the platform config directory)
    #[arg(long, global = true, env = "KUPON_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// True when the command asked for machine-readable output.
    pub fn wants_json(&self) -> bool {
        match &self.command {
            Command::Issue(args) => args.json,
            Command::Config(args) => args.json,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Issue a redemption code for one item
    Issue(IssueArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct IssueArgs {
    /// Product code
    #[arg(long)]
    pub code: String,

    /// Product name
    #[arg(long)]
    pub name: String,

    /// Price in whole rupiah
    #[arg(long)]
    pub price: u64,

    /// Product description (replaced on the issued code)
    #[arg(long)]
    pub description: Option<String>,

    /// Product image: data:image URI, absolute path or http(s) URL
    #[arg(long)]
    pub image: Option<String>,

    /// Outlet name
    #[arg(long)]
    pub outlet_name: String,

    /// Outlet address
    #[arg(long)]
    pub outlet_address: String,

    /// Directory for qr-<id>.png and barcode-<id>.png
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// Print the issued code as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the live countdown for this many seconds
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Copy the product code to the terminal clipboard
    #[arg(long)]
    pub copy: bool,
}

impl IssueArgs {
    /// The item as entered.
    pub fn food_item(&self) -> FoodItem {
        let mut item = FoodItem::new(self.code.trim(), self.name.trim(), self.price);
        item.description = self.description.clone();
        item.image = self.image.clone();
        item
    }

    /// The outlet as entered.
    pub fn outlet(&self) -> OutletInfo {
        OutletInfo::new(self.outlet_name.trim(), self.outlet_address.trim())
    }
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Print as JSON instead of TOML
    #[arg(long)]
    pub json: bool,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    pub save: bool,
}
