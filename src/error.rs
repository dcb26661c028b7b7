pub use crate::types::SubprobeError;

pub type Result<T> = std::result::Result<T, SubprobeError>;

/// Attaches a message to a foreign error while converting it into a
/// [`SubprobeError`] of the kind chosen by `wrap`.
pub trait ErrorContext<T> {
    fn with_context<F>(self, wrap: fn(String) -> SubprobeError, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_context<F>(self, wrap: fn(String) -> SubprobeError, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(format!("{}: {}", f(), e)))
    }
}
