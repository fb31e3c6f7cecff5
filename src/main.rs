use clap::{Parser, Subcommand, ValueEnum};
use geohex_rs::{CsvToZones, GeohexError, GeometryFormat, Zone, ZoneCsvConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geohex", version, about = "GeoHex v3 zone codes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the zone containing a coordinate
    Encode {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, default_value_t = 7)]
        level: u8,
    },
    /// Print the zone named by a code
    Decode { code: String },
    /// Print the 18 zones three steps from a code
    Ring { code: String },
    /// Tag every row of a CSV with its zone code
    Csv {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 7)]
        level: u8,
        /// Column holding WKT or GeoJSON
        #[arg(long, conflicts_with_all = ["lon_column", "lat_column"])]
        geometry_column: Option<String>,
        #[arg(long, default_value = "lng")]
        lon_column: String,
        #[arg(long, default_value = "lat")]
        lat_column: String,
        /// Input columns to drop from the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Also write geohex_x and geohex_y
        #[arg(long)]
        position: bool,
        #[arg(long, value_enum)]
        zone_geometry: Option<OutlineFormat>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutlineFormat {
    Wkt,
    Geojson,
}

impl From<OutlineFormat> for GeometryFormat {
    fn from(format: OutlineFormat) -> Self {
        match format {
            OutlineFormat::Wkt => GeometryFormat::Wkt,
            OutlineFormat::Geojson => GeometryFormat::GeoJson,
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), GeohexError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| GeohexError::IoError(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn run(cli: Cli) -> Result<(), GeohexError> {
    match cli.command {
        Command::Encode { lat, lon, level } => print_json(&Zone::encode(lat, lon, level)?),
        Command::Decode { code } => print_json(&Zone::decode(code.as_str())?),
        Command::Ring { code } => {
            let ring = Zone::decode(code.as_str())?
                .map(|zone| zone.ring())
                .unwrap_or_default();
            print_json(&ring)
        }
        Command::Csv {
            input,
            output,
            level,
            geometry_column,
            lon_column,
            lat_column,
            exclude,
            position,
            zone_geometry,
        } => {
            let mut config = match geometry_column {
                Some(column) => ZoneCsvConfig::new(column, level),
                None => ZoneCsvConfig::from_coords(lon_column, lat_column, level),
            }
            .exclude(exclude);
            if position {
                config = config.with_position();
            }
            if let Some(format) = zone_geometry {
                config = config.with_zone_geometry(format.into());
            }
            input.to_zone_csv(&output, &config)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
