// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use almanac_env::{EnvError, Environment, get_parsed};

pub const ALMANAC_INTROSPECTION: &str = "ALMANAC_INTROSPECTION";

pub const ALMANAC_SERVER_PORT: &str = "ALMANAC_SERVER_PORT";
pub const ALMANAC_SERVER_HOST: &str = "ALMANAC_SERVER_HOST";

pub const ALMANAC_DEPLOYMENT_MODE: &str = "ALMANAC_DEPLOYMENT_MODE"; // "dev" or "prod" (default)

pub const ALMANAC_DATA_FILE: &str = "ALMANAC_DATA_FILE";
pub const ALMANAC_CREATE_ID_MODE: &str = "ALMANAC_CREATE_ID_MODE";

pub const ALMANAC_PLAYGROUND_HTTP_PATH: &str = "ALMANAC_PLAYGROUND_HTTP_PATH";
pub const ALMANAC_GRAPHQL_HTTP_PATH: &str = "ALMANAC_GRAPHQL_HTTP_PATH";

pub const ALMANAC_GRAPHQL_ALLOW_MUTATIONS: &str = "ALMANAC_GRAPHQL_ALLOW_MUTATIONS";
pub const ALMANAC_MAX_SELECTION_DEPTH: &str = "ALMANAC_MAX_SELECTION_DEPTH";

const DEFAULT_SERVER_PORT: u16 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Dev,
    Prod,
}

pub fn get_deployment_mode(env: &dyn Environment) -> Result<DeploymentMode, EnvError> {
    let deployment_mode = env.get(ALMANAC_DEPLOYMENT_MODE);

    match deployment_mode.as_deref() {
        Some("dev") => Ok(DeploymentMode::Dev),
        Some("prod") | None => Ok(DeploymentMode::Prod),
        Some(other) => Err(EnvError::InvalidEnum {
            env_key: ALMANAC_DEPLOYMENT_MODE,
            env_value: other.to_string(),
            message: "Must be one of 'dev' or 'prod'".to_string(),
        }),
    }
}

pub fn get_server_port(env: &dyn Environment) -> Result<u16, EnvError> {
    get_parsed(env, ALMANAC_SERVER_PORT, DEFAULT_SERVER_PORT)
}

pub fn get_playground_http_path(env: &dyn Environment) -> String {
    env.get(ALMANAC_PLAYGROUND_HTTP_PATH)
        .unwrap_or_else(|| "/playground".to_string())
}

pub fn get_graphql_http_path(env: &dyn Environment) -> String {
    env.get(ALMANAC_GRAPHQL_HTTP_PATH)
        .unwrap_or_else(|| "/graphql".to_string())
}

/// Location of the dataset served by the subsystem named `dataset`.
pub fn get_data_file(env: &dyn Environment, dataset: &str) -> String {
    env.get(ALMANAC_DATA_FILE)
        .unwrap_or_else(|| format!("data/{dataset}.json"))
}

#[cfg(test)]
mod tests {
    use almanac_env::MapEnvironment;

    use super::*;

    #[test]
    fn defaults() {
        let env = MapEnvironment::new();

        assert_eq!(get_deployment_mode(&env).unwrap(), DeploymentMode::Prod);
        assert_eq!(get_server_port(&env).unwrap(), 4000);
        assert_eq!(get_graphql_http_path(&env), "/graphql");
        assert_eq!(get_playground_http_path(&env), "/playground");
        assert_eq!(get_data_file(&env, "countries"), "data/countries.json");
    }

    #[test]
    fn overrides() {
        let env = MapEnvironment::from([
            (ALMANAC_DEPLOYMENT_MODE, "dev"),
            (ALMANAC_SERVER_PORT, "8080"),
            (ALMANAC_GRAPHQL_HTTP_PATH, "/api/graphql"),
            (ALMANAC_DATA_FILE, "/srv/champions.json"),
        ]);

        assert_eq!(get_deployment_mode(&env).unwrap(), DeploymentMode::Dev);
        assert_eq!(get_server_port(&env).unwrap(), 8080);
        assert_eq!(get_graphql_http_path(&env), "/api/graphql");
        assert_eq!(get_data_file(&env, "champions"), "/srv/champions.json");
    }

    #[test]
    fn invalid_values() {
        let env = MapEnvironment::from([
            (ALMANAC_DEPLOYMENT_MODE, "staging"),
            (ALMANAC_SERVER_PORT, "-1"),
        ]);

        assert!(matches!(
            get_deployment_mode(&env),
            Err(EnvError::InvalidEnum { .. })
        ));
        assert!(matches!(
            get_server_port(&env),
            Err(EnvError::InvalidValue { .. })
        ));
    }
}
