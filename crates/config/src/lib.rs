//! Configuration: schema, discovery and loading, `${ENV}` substitution, and
//! the line-oriented credential/message sources.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod sources;

pub use {
    loader::{
        clear_config_dir, config_dir, discover_and_load, load_config, set_config_dir,
    },
    schema::{DispatchDefaults, HeraldConfig, SourcesConfig},
    sources::{load_credentials, load_messages, read_lines},
};
