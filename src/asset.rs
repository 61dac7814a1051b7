use std::fmt::Display;

/// A value that is loaded once and consulted every frame.
///
/// Consumers check [`Loadable::get`] at each use site and skip their work
/// while the value is missing, they never wait on it.
#[derive(Debug, Clone, Default)]
pub enum Loadable<T> {
    #[default]
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    /// Wraps the outcome of a load, logging the failure if there was one.
    pub fn from_result<E: Display>(what: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(value) => {
                log::info!("{what} loaded successfully");
                Self::Ready(value)
            }
            Err(e) => {
                log::error!("Error loading {what}: {e}");
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason.as_str()),
            Self::Pending | Self::Ready(_) => None,
        }
    }
}
