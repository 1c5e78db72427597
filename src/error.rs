pub type PictResult<T> = Result<T, PictError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PictError {
    /// A pixel buffer, weight table, or intermediate picture could not be allocated.
    #[error("out of memory allocating {what}")]
    OutOfMemory { what: &'static str },

    #[error("invalid picture geometry: {0}")]
    InvalidGeometry(String),
}

impl PictError {
    pub fn out_of_memory(what: &'static str) -> Self {
        log::warn!("allocation failed for {what}");
        Self::OutOfMemory { what }
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }
}
