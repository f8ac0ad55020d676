pub mod app_config;
pub mod config;
pub mod hotels;
pub mod images;
pub mod results;
pub mod search;
pub mod template;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use hotels::{load_hotels, slugify, HotelRecord, HotelRegistry, HotelsFile};
pub use images::{proxy_image_url, IMAGE_PROXY_PATH};
pub use results::{
    AggregatedHotelResult, Coordinates, HotelDetail, HotelMetadata, NearbyPlace, Offer, RoomOffer,
    Transportation, OFFICIAL_SITE_SOURCE,
};
pub use search::{SearchCriteria, ValidationError, MAX_ADULTS, MAX_CHILDREN, MAX_DAYS_AHEAD};
pub use template::{render_url, try_render_url, Placeholder, TemplateError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read hotels file {path}: {source}")]
    HotelsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hotels file: {0}")]
    HotelsFileParse(#[from] serde_yaml::Error),

    #[error("hotel registry validation failed: {0}")]
    Validation(String),
}
