#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("scene layout has no rows")]
    EmptyScene,

    #[error("unknown cell glyph {glyph:?} at row {row}, column {column}")]
    UnknownCellGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },

    #[error("window error: {0}")]
    Window(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
