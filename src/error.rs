use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid drawing surface: {0}")]
    InvalidSurface(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("picking colour space exhausted ({0} figures registered in one pass)")]
    PickColorsExhausted(u32),
}
