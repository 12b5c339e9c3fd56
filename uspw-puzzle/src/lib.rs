//! Basic puzzle data types used by the uspw USP-weakness solver.

pub mod gen;
pub mod matrix;
pub mod usp;

pub use matrix::Matrix;
pub use usp::{Usp, UspError};
