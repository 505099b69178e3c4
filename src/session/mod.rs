pub mod login;

pub use login::{check_credentials, greeting, validate_name, validate_password, LoginError};
