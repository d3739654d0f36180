pub mod common;
pub mod get_schema;
pub mod read;
pub mod validate_config;

pub use common::{
    CONFIG_ERROR_SUMMARY, ConfigValueError, ReadResponse, RemoteStateRequest, ValidateResponse,
    read_config_values,
};
pub use get_schema::get_schema;
pub use read::read_data_source;
pub use validate_config::validate_config;
