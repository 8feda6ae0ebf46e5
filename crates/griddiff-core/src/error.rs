pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed network diff result: {message}")]
    MalformedDiff { message: String },

    #[error("malformed levels configuration: {message}")]
    MalformedLevels { message: String },
}
