pub mod app;
pub mod config;
pub mod profile;
pub mod recommend;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_support;
