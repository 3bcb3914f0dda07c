pub mod auth;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod server;
pub mod telemetry;

/**
 * \brief SDK prelude for the commonly used modules.
 */
pub mod prelude {
    pub use crate::auth;
    pub use crate::config;
    pub use crate::error;
    pub use crate::llm;
    pub use crate::models;
    pub use crate::prompts;
    pub use crate::server;
    pub use crate::telemetry;
}
