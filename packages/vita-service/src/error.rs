pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Store { message: String },
	#[error("Deadline exceeded: {message}")]
	DeadlineExceeded { message: String },
}

impl From<vita_storage::Error> for Error {
	fn from(err: vita_storage::Error) -> Self {
		match err {
			vita_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			other => Self::Store { message: other.to_string() },
		}
	}
}
