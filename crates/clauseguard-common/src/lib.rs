pub mod errors;
pub mod id;
pub mod notifications;

pub use errors::{ClientError, ConfigError};
pub use id::{new_correlation_id, ContractId, JobId, RiskId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};

pub type Result<T> = std::result::Result<T, ClientError>;
