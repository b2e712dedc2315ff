use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitsError {
    #[error("Limit `{name}` must be greater than zero")]
    ZeroLimit { name: &'static str },
}
