// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use almanac_env::Environment;

use crate::{EnvError, env_const::ALMANAC_INTROSPECTION};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntrospectionMode {
    Enabled,  // Schema queries and the playground are served
    Disabled, // Any `__schema`/`__type` query is rejected
}

pub fn introspection_mode(env: &dyn Environment) -> Result<IntrospectionMode, EnvError> {
    match env.get(ALMANAC_INTROSPECTION) {
        Some(e) => match e.to_lowercase().as_str() {
            "true" | "enabled" | "1" => Ok(IntrospectionMode::Enabled),
            "false" | "disabled" | "0" => Ok(IntrospectionMode::Disabled),
            _ => Err(EnvError::InvalidEnum {
                env_key: ALMANAC_INTROSPECTION,
                env_value: e,
                message: "Must be set to either true, enabled, 1, false, disabled, or 0"
                    .to_string(),
            }),
        },

        None => Ok(IntrospectionMode::Enabled),
    }
}

#[cfg(test)]
mod tests {
    use almanac_env::MapEnvironment;

    use super::*;

    #[test]
    fn enabled_unless_turned_off() {
        let mode = |value: Option<&str>| {
            let mut env = MapEnvironment::new();
            if let Some(value) = value {
                env.set(ALMANAC_INTROSPECTION, value);
            }
            introspection_mode(&env)
        };

        assert_eq!(mode(None).unwrap(), IntrospectionMode::Enabled);
        assert_eq!(mode(Some("Enabled")).unwrap(), IntrospectionMode::Enabled);
        assert_eq!(mode(Some("false")).unwrap(), IntrospectionMode::Disabled);
        assert!(mode(Some("sometimes")).is_err());
    }
}
