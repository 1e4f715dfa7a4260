pub mod config;
pub mod dataset;
pub mod error;
pub mod value;

pub use config::{load_dotenv, EngineConfig};
pub use dataset::{Dataset, Row, RowId};
pub use error::SiftError;
pub use value::{parse_timestamp, FieldValue};
