use std::env;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Deployment-tunable retrieval pipeline settings. Validated once at startup
/// so the pipeline itself never has to re-check them mid-run.
#[derive(Debug, Clone)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embedding_dimension: usize,
    pub top_k: i32,
    pub similarity_threshold: f32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            embedding_dimension: 1536,
            top_k: 5,
            similarity_threshold: 0.7,
        }
    }
}

impl RagConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            chunk_size: read_env("CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: read_env("CHUNK_OVERLAP", defaults.chunk_overlap)?,
            embedding_dimension: read_env("EMBEDDING_DIMENSION", defaults.embedding_dimension)?,
            top_k: read_env("TOP_K_RESULTS", defaults.top_k)?,
            similarity_threshold: read_env("SIMILARITY_THRESHOLD", defaults.similarity_threshold)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidValue(
                "chunk_size must be greater than zero".to_string(),
            ));
        }

        // An overlap >= chunk_size would stall the segmentation cursor.
        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::InvalidValue(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.embedding_dimension == 0 {
            return Err(ConfigError::InvalidValue(
                "embedding_dimension must be greater than zero".to_string(),
            ));
        }

        if self.top_k <= 0 || self.top_k > 100 {
            return Err(ConfigError::InvalidValue(format!(
                "top_k must be between 1 and 100, got {}",
                self.top_k
            )));
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidValue(format!(
                "similarity_threshold must be between 0.0 and 1.0, got {}",
                self.similarity_threshold
            )));
        }

        Ok(())
    }
}

fn read_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::ParseError(format!("{} has invalid value '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
