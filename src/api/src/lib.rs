pub mod config;
pub mod game;
pub mod http_api;

#[cfg(test)]
mod test_utils;
