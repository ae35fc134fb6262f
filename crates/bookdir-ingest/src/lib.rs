pub mod columns;
pub mod error;
pub mod process;
pub mod reader;

pub use error::IngestError;
pub use process::process_record;
pub use reader::{ingest_csv, ingest_reader, IngestReport, RowError};
