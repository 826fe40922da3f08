pub mod squared_error;

pub use squared_error::{average_squared_error, SquaredErrorLoss};
