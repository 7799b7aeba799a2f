use std::fmt;
use thiserror::Error;

/// The repository operation during which an error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Connect,
    HealthCheck,
    InitSchema,
    CreateCar,
    GetCar,
    GetAllCars,
    GetCarsByDriver,
    UpdateCar,
    DeleteCar,
    CreateManufacturer,
    GetManufacturer,
    GetAllManufacturers,
    CreateDriver,
    GetDriver,
    GetAllDrivers,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Connect => "connect",
            Operation::HealthCheck => "check health",
            Operation::InitSchema => "initialize schema",
            Operation::CreateCar => "create car",
            Operation::GetCar => "get car",
            Operation::GetAllCars => "get all cars",
            Operation::GetCarsByDriver => "get cars by driver",
            Operation::UpdateCar => "update car",
            Operation::DeleteCar => "delete car",
            Operation::CreateManufacturer => "create manufacturer",
            Operation::GetManufacturer => "get manufacturer",
            Operation::GetAllManufacturers => "get all manufacturers",
            Operation::CreateDriver => "create driver",
            Operation::GetDriver => "get driver",
            Operation::GetAllDrivers => "get all drivers",
        };
        f.write_str(name)
    }
}

/// The step of a (possibly multi-statement) operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    Schema,
    Begin,
    CarRow,
    UnlinkDrivers,
    LinkDrivers,
    Read,
    Write,
    Commit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Connect => "connect",
            Stage::Schema => "schema",
            Stage::Begin => "begin transaction",
            Stage::CarRow => "car row",
            Stage::UnlinkDrivers => "unlink drivers",
            Stage::LinkDrivers => "link drivers",
            Stage::Read => "read",
            Stage::Write => "write",
            Stage::Commit => "commit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Can't {operation} ({stage}) for {subject}: {source}")]
    Persistence {
        operation: Operation,
        stage: Stage,
        subject: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Build a persistence error, logging it where it is mapped
    pub fn persistence(
        operation: Operation,
        stage: Stage,
        subject: impl Into<String>,
        source: sqlx::Error,
    ) -> Self {
        let subject = subject.into();
        tracing::warn!(%operation, %stage, %subject, error = %source, "store access failed");
        AppError::Persistence {
            operation,
            stage,
            subject,
            source,
        }
    }

    /// Returns a closure suitable for `map_err` on sqlx results
    ///
    /// The subject is only rendered once an error actually occurs.
    pub fn at<S: fmt::Display>(
        operation: Operation,
        stage: Stage,
        subject: S,
    ) -> impl FnOnce(sqlx::Error) -> AppError {
        move |e| AppError::persistence(operation, stage, subject.to_string(), e)
    }

    /// The failing stage, if this is a persistence error
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AppError::Persistence { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The failing operation, if this is a persistence error
    pub fn operation(&self) -> Option<Operation> {
        match self {
            AppError::Persistence { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
