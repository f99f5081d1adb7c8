pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::FileProcessingPipeline;
pub use domain::error::{AppError, Result};
pub use domain::table::{Cell, Column, ColumnKind, Table};
pub use domain::upload::{TableFormat, UploadedFile};
