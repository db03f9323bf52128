pub mod batch;
pub mod checks;
pub mod cli;
pub mod validator;

pub use batch::{BatchOutcome, BatchRunner, BatchStats, Outcome};
pub use checks::{control_digit, Category};
pub use cli::Cli;
pub use validator::{check, check_opt, validate, validate_opt, Identifier, ValidationError};
