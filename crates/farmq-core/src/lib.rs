#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod domains;
pub mod error;
pub mod traits;

pub use error::{Error, Result};
