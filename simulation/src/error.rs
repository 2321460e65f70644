use quadtree::QuadtreeError;
use std::fmt;

#[derive(Debug)]
pub enum SimError {
    Config(QuadtreeError),
    InvalidWorld { width: f32, height: f32 },
    InvalidTick { dt: f32 },
    InvalidRun { ticks: u64 },
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

pub type SimResult<T> = Result<T, SimError>;

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Config(err) => write!(f, "invalid index configuration: {}", err),
            SimError::InvalidWorld { width, height } => {
                write!(
                    f,
                    "world width/height must be finite and positive (width: {}, height: {})",
                    width, height
                )
            }
            SimError::InvalidTick { dt } => {
                write!(f, "tick duration must be finite and non-negative (dt: {})", dt)
            }
            SimError::InvalidRun { ticks } => write!(
                f,
                "run length must be at most {} ticks (ticks: {})",
                crate::config::MAX_RUN_TICKS,
                ticks
            ),
            SimError::Io(err) => write!(f, "config file error: {}", err),
            SimError::Parse(err) => write!(f, "config parse error: {}", err),
            SimError::Serialize(err) => write!(f, "config serialize error: {}", err),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Config(err) => Some(err),
            SimError::Io(err) => Some(err),
            SimError::Parse(err) => Some(err),
            SimError::Serialize(err) => Some(err),
            SimError::InvalidWorld { .. }
            | SimError::InvalidTick { .. }
            | SimError::InvalidRun { .. } => None,
        }
    }
}

impl From<QuadtreeError> for SimError {
    fn from(err: QuadtreeError) -> Self {
        SimError::Config(err)
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err)
    }
}

impl From<toml::de::Error> for SimError {
    fn from(err: toml::de::Error) -> Self {
        SimError::Parse(err)
    }
}

impl From<toml::ser::Error> for SimError {
    fn from(err: toml::ser::Error) -> Self {
        SimError::Serialize(err)
    }
}
