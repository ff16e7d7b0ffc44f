use clap::Parser;
use std::path::PathBuf;

/// Highlight the nearest counties whose combined population matches a city
#[derive(Debug, Clone, Parser)]
#[command(name = "county-footprint", version, about)]
pub struct Config {
    /// Directory holding the datasets
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// County boundaries (GeoJSON), relative to the data directory
    #[arg(long, default_value = "counties.geojson")]
    pub counties: PathBuf,

    /// State boundaries (GeoJSON), optional
    #[arg(long, default_value = "states.geojson")]
    pub states: PathBuf,

    /// County population table (JSON)
    #[arg(long, default_value = "county_populations.json")]
    pub populations: PathBuf,

    /// Reference cities (JSON)
    #[arg(long, default_value = "cities.json")]
    pub cities: PathBuf,

    /// Reference city selected at startup
    #[arg(long, default_value = "New York City")]
    pub city: String,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level filter; RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn counties_path(&self) -> PathBuf {
        self.data_dir.join(&self.counties)
    }

    pub fn states_path(&self) -> PathBuf {
        self.data_dir.join(&self.states)
    }

    pub fn populations_path(&self) -> PathBuf {
        self.data_dir.join(&self.populations)
    }

    pub fn cities_path(&self) -> PathBuf {
        self.data_dir.join(&self.cities)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["county-footprint"])
    }
}
