use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecueilError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed {field} value: {value}")]
    Format { field: &'static str, value: String },

    #[error("Poem '{poem_id}': category label '{label}' is not in the configured taxonomy")]
    UnmappedCategory { poem_id: String, label: String },

    #[error("Poem '{poem_id}': verse length is variable but info does not declare the metric list")]
    InvalidMetricState { poem_id: String },

    #[error("Malformed acrostiche value (missing separator): {0}")]
    MalformedAcrostiche(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, RecueilError>;
