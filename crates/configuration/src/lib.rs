pub mod configuration;
pub mod error;
pub mod policy;
pub mod to_runtime_configuration;
pub mod version1;

pub use configuration::Configuration;
pub use policy::{default_policy, install_default_policy, Policy};
pub use to_runtime_configuration::make_runtime_configuration;
pub use version1::{parse_configuration, write_parsed_configuration, ParsedConfiguration};
