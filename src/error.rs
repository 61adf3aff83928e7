use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The bar was measured shorter than its collapsed height.
    #[error("collapsed height {collapsed} can't exceed expanded height {expanded}")]
    CollapsedExceedsExpanded { collapsed: i32, expanded: i32 },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapping was requested before the host measured the bar.
    #[error("bar has not been measured yet")]
    NotMeasured,

    #[error("Unrecognized auto-animation action: {0}")]
    InvalidAction(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
