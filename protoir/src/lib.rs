mod util;
pub mod config;
pub mod error;
pub mod schema;

#[cfg(test)]
mod test_util;
