// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to configuration values.
//!
//! Library code never reads `std::env` directly. It goes through an [`Environment`], so that
//! servers use the process environment ([`SystemEnvironment`]) while tests supply a
//! [`MapEnvironment`].

mod map;

use std::str::FromStr;

pub use map::MapEnvironment;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
                "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or(default_value.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid env value {env_value} for {env_key}: {message}")]
    InvalidEnum {
        env_key: &'static str,
        env_value: String,
        message: String,
    },

    #[error("Invalid env value {env_value} for {env_key}: expected a value of type {expected}")]
    InvalidValue {
        env_key: &'static str,
        env_value: String,
        expected: &'static str,
    },
}

/// Parse the value of `key`, falling back to `default_value` if the key is not set.
pub fn get_parsed<T: FromStr>(
    env: &dyn Environment,
    key: &'static str,
    default_value: T,
) -> Result<T, EnvError> {
    match env.get(key) {
        Some(value) => value.trim().parse().map_err(|_| EnvError::InvalidValue {
            env_key: key,
            env_value: value,
            expected: std::any::type_name::<T>(),
        }),
        None => Ok(default_value),
    }
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
