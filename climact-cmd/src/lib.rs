//! Command implementations for the ClimACT CLI.
//!
//! Every subcommand loads the last selection from the state file, so
//! consecutive invocations behave like one browsing session.

use clap::{Args, Subcommand};
use climact_core::config::{ServiceConfig, DEFAULT_DATA_URL, DEFAULT_WMS_URL};
use climact_core::persist::JsonFileStore;
use climact_core::selection::SelectionStore;

pub mod chart;
pub mod map;
pub mod select;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Context {
    /// JSON file holding the persisted selection
    #[arg(long, env = "CLIMACT_STATE", default_value = ".climact/state.json", global = true)]
    pub state: String,

    /// Base URL of the tabular data service
    #[arg(long, env = "CLIMACT_DATA_URL", default_value = DEFAULT_DATA_URL, global = true)]
    pub data_url: String,

    /// Base URL of the WMS endpoint
    #[arg(long, env = "CLIMACT_WMS_URL", default_value = DEFAULT_WMS_URL, global = true)]
    pub wms_url: String,
}

impl Context {
    pub fn services(&self) -> ServiceConfig {
        ServiceConfig::new(self.data_url.as_str(), self.wms_url.as_str())
    }

    pub fn store(&self) -> SelectionStore<JsonFileStore> {
        SelectionStore::load(JsonFileStore::open(&self.state))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current selection and the keys derived from it
    Show,

    /// Select a time period by id (e.g. 1995_2014, 2046_2065)
    SetPeriod {
        period: String,
    },

    /// Select a future scenario by id (e.g. ssp245); ignored for the historical period
    SetScenario {
        scenario: String,
    },

    /// Select a variable by code (e.g. T2MEAN, KOPPEN)
    SetVariable {
        variable: String,
    },

    /// Print the layout class (compact or wide) for a viewport width; nothing is saved
    Viewport {
        #[arg(short, long)]
        width: u32,
    },

    /// Fetch the monthly series and print the chart spec as JSON
    Chart,

    /// Fetch the monthly series and write it as CSV
    Export {
        /// Output path for the month,value CSV
        #[arg(short, long)]
        output: String,
    },

    /// Print the GetMap and legend URLs for the selected layer
    Map,

    /// Look up the layer value at a point
    Feature {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Visible extent as south,west,north,east
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<String>,

        /// Viewport size in pixels as WIDTHxHEIGHT
        #[arg(long)]
        size: Option<String>,
    },

    /// List periods, scenarios and variables
    Catalog,
}

pub async fn run(context: Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Show => {
            let store = context.store();
            println!("{}", select::describe(store.state()));
            Ok(())
        }
        Command::SetPeriod { period } => {
            let mut store = context.store();
            println!("{}", select::set_period(&mut store, &period)?);
            Ok(())
        }
        Command::SetScenario { scenario } => {
            let mut store = context.store();
            println!("{}", select::set_scenario(&mut store, &scenario)?);
            Ok(())
        }
        Command::SetVariable { variable } => {
            let mut store = context.store();
            println!("{}", select::set_variable(&mut store, &variable)?);
            Ok(())
        }
        Command::Viewport { width } => {
            let store = context.store();
            println!("{}", select::viewport_class(store.state(), width));
            Ok(())
        }
        Command::Chart => chart::run_chart(&context).await,
        Command::Export { output } => chart::run_export(&context, &output).await,
        Command::Map => map::run_map(&context),
        Command::Feature {
            lat,
            lng,
            bbox,
            size,
        } => map::run_feature(&context, lat, lng, bbox.as_deref(), size.as_deref()).await,
        Command::Catalog => {
            print!("{}", select::catalog_listing());
            Ok(())
        }
    }
}
