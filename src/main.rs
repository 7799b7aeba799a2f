use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;

use car_registry::config::AppConfig;
use car_registry::error::{AppError, AppResult};
use car_registry::models::{Car, Driver, Manufacturer};
use car_registry::{logging, startup, RegistryBackend};

#[derive(Parser, Debug)]
#[command(name = "car-registry")]
#[command(about = "Manage cars, their manufacturers and drivers")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the tables if they do not exist
    Init,
    /// Register a manufacturer
    AddManufacturer { name: String, country: String },
    /// Register a driver
    AddDriver { name: String, licence: String },
    /// Create a car with its drivers
    AddCar {
        model: String,
        #[arg(long)]
        manufacturer: i64,
        #[arg(long = "driver")]
        drivers: Vec<i64>,
    },
    /// Replace model, manufacturer and drivers of a car
    UpdateCar {
        id: i64,
        model: String,
        #[arg(long)]
        manufacturer: i64,
        #[arg(long = "driver")]
        drivers: Vec<i64>,
    },
    /// Show one car
    Show { id: i64 },
    /// List cars, optionally only those of one driver
    List {
        #[arg(long)]
        driver: Option<i64>,
    },
    /// Soft delete a car
    Delete { id: i64 },
    /// List manufacturers
    Manufacturers,
    /// List drivers
    Drivers,
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve the manufacturer and driver ids given on the command line
async fn assemble_car(
    backend: &dyn RegistryBackend,
    model: String,
    manufacturer_id: i64,
    driver_ids: &[i64],
) -> AppResult<Car> {
    let manufacturer = backend
        .find_manufacturer_by_id(manufacturer_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("Manufacturer {} not found", manufacturer_id))
        })?;

    let mut drivers = Vec::with_capacity(driver_ids.len());
    for id in driver_ids {
        let driver = backend
            .find_driver_by_id(*id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Driver {} not found", id)))?;
        drivers.push(driver);
    }

    Ok(Car::new(model, manufacturer, drivers))
}

async fn run(backend: &dyn RegistryBackend, command: Command) -> AppResult<()> {
    match command {
        Command::Init => {
            // setup_backend already created the schema
            println!("Schema ready");
        }
        Command::AddManufacturer { name, country } => {
            let manufacturer = backend
                .create_manufacturer(&Manufacturer::new(name, country))
                .await?;
            print_json(&manufacturer)?;
        }
        Command::AddDriver { name, licence } => {
            let driver = backend.create_driver(&Driver::new(name, licence)).await?;
            print_json(&driver)?;
        }
        Command::AddCar {
            model,
            manufacturer,
            drivers,
        } => {
            let car = assemble_car(backend, model, manufacturer, &drivers).await?;
            let created = backend.create_car(&car).await?;
            tracing::info!(car_id = ?created.id, "car created");
            print_json(&created)?;
        }
        Command::UpdateCar {
            id,
            model,
            manufacturer,
            drivers,
        } => {
            let mut car = assemble_car(backend, model, manufacturer, &drivers).await?;
            car.id = Some(id);
            match backend.update_car(&car).await? {
                Some(updated) => print_json(&updated)?,
                None => println!("Car {} not found", id),
            }
        }
        Command::Show { id } => match backend.find_car_by_id(id).await? {
            Some(car) => print_json(&car)?,
            None => println!("Car {} not found", id),
        },
        Command::List { driver } => {
            let cars = match driver {
                Some(driver_id) => backend.find_cars_by_driver(driver_id).await?,
                None => backend.find_all_cars().await?,
            };
            print_json(&cars)?;
        }
        Command::Delete { id } => {
            if backend.delete_car(id).await? {
                println!("Car {} deleted", id);
            } else {
                println!("Car {} not found", id);
            }
        }
        Command::Manufacturers => print_json(&backend.find_all_manufacturers().await?)?,
        Command::Drivers => print_json(&backend.find_all_drivers().await?)?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Fall back to an in-memory store when the default file is absent
    let config = if args.config == "config.yaml" && !Path::new("config.yaml").exists() {
        eprintln!("No config.yaml found, using an in-memory SQLite database");
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config)?
    };

    logging::init(config.log_level());

    let backend = startup::setup_backend(&config).await?;
    let result = run(backend.as_ref(), args.command).await;
    backend.cleanup().await?;

    result.map_err(Into::into)
}
