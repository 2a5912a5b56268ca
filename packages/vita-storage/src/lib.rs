pub mod db;
pub mod resumes;
pub mod schema;
pub mod sql;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
