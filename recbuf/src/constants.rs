#[cfg(test)]
#[path = "../tests/constants.rs"]
mod tests;

use std::collections::HashMap;
use std::env::var;
use std::ops::Index;

use log::warn;

pub mod keys {
    pub const RECBUF_BUFFER_SIZE: &str = "RECBUF_BUFFER_SIZE";
    pub const RECBUF_POOL_INITIAL: &str = "RECBUF_POOL_INITIAL";
    pub const RECBUF_POOL_MAX: &str = "RECBUF_POOL_MAX";
}

mod values {
    pub const RECBUF_BUFFER_SIZE: u64 = 8192;
    pub const RECBUF_POOL_INITIAL: u64 = 0;
    pub const RECBUF_POOL_MAX: u64 = 1024;
}

/// Compiled default region size; `RECBUF_BUFFER_SIZE` overrides it in `Settings`.
pub const BUFFER_SIZE: usize = values::RECBUF_BUFFER_SIZE as usize;

type DefaultMap = HashMap<&'static str, u64>;

#[inline]
fn default_values_map() -> DefaultMap {
    let mut map = HashMap::new();
    map.insert(keys::RECBUF_BUFFER_SIZE, values::RECBUF_BUFFER_SIZE);
    map.insert(keys::RECBUF_POOL_INITIAL, values::RECBUF_POOL_INITIAL);
    map.insert(keys::RECBUF_POOL_MAX, values::RECBUF_POOL_MAX);
    map
}

#[inline]
fn environment_values_map(mut default_values_map: DefaultMap) -> DefaultMap {
    for (key, value) in default_values_map.iter_mut() {
        if let Ok(res) = var(*key) {
            match res.parse::<u64>() {
                Ok(res) => *value = res,
                Err(_) => warn!("Environment variable '{key}' set to value '{res}' that can not be parsed as 64bit unsigned integer, skipping..."),
            }
        }
    }
    default_values_map
}

pub struct SettingsBuilder {
    map: DefaultMap,
}

impl SettingsBuilder {
    #[inline]
    pub fn update(mut self, key: &'static str, value: u64) -> Self {
        self.map.insert(key, value);
        self
    }

    #[inline]
    pub fn build(self) -> Settings {
        Settings {
            map: self.map,
        }
    }
}

impl Default for SettingsBuilder {
    #[inline]
    fn default() -> Self {
        Self {
            map: environment_values_map(default_values_map()),
        }
    }
}

/// Pool sizing settings, defaults overridden by `RECBUF_*` environment variables.
pub struct Settings {
    map: DefaultMap,
}

impl Settings {
    /// Fixed size of every pooled region.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        self[keys::RECBUF_BUFFER_SIZE] as usize
    }

    /// Number of regions allocated up front.
    #[inline]
    pub fn pool_initial(&self) -> usize {
        self[keys::RECBUF_POOL_INITIAL] as usize
    }

    /// Maximum number of idle regions the pool keeps.
    #[inline]
    pub fn pool_max(&self) -> usize {
        self[keys::RECBUF_POOL_MAX] as usize
    }
}

impl Index<&str> for Settings {
    type Output = u64;

    fn index(&self, index: &str) -> &Self::Output {
        &self.map[index]
    }
}

impl Default for Settings {
    #[inline]
    fn default() -> Self {
        SettingsBuilder::default().build()
    }
}
