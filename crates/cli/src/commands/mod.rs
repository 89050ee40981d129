//! Command implementations.

mod policy;
mod publish;
mod validate;

pub use policy::run_policy;
pub use publish::run_publish;
pub use validate::run_validate;
