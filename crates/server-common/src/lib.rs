// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use almanac_env::Environment;
use champion_resolver::plugin::ChampionSubsystemLoader;
use common::logging_tracing::{self, TracingInitError};
use country_resolver::plugin::CountrySubsystemLoader;
use system_router::{
    PlaygroundPage, StaticLoaders, SystemLoadingError, SystemRouter, create_system_router,
};
use thiserror::Error;

/// The datasets a server binary can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Countries,
    Champions,
}

impl Service {
    pub fn static_loaders(self) -> StaticLoaders {
        match self {
            Service::Countries => vec![Box::new(CountrySubsystemLoader {})],
            Service::Champions => vec![Box::new(ChampionSubsystemLoader {})],
        }
    }

    pub fn playground_page(self) -> PlaygroundPage {
        match self {
            Service::Countries => PlaygroundPage {
                title: "Countries",
                default_query: COUNTRIES_DEFAULT_QUERY,
            },
            Service::Champions => PlaygroundPage {
                title: "Champions",
                default_query: CHAMPIONS_DEFAULT_QUERY,
            },
        }
    }
}

const COUNTRIES_DEFAULT_QUERY: &str = r#"{
  country(name: "Germany") {
    __typename
    ... on Country {
      name
      region
      languages
    }
    ... on Error {
      message
    }
  }
}
"#;

const CHAMPIONS_DEFAULT_QUERY: &str = r#"{
  getChampionsByTag(tag: "Tank") {
    __typename
    ... on Champions {
      items {
        name
        title
      }
    }
    ... on NotFoundError {
      message
    }
  }
}
"#;

#[derive(Error, Debug)]
pub enum ServerInitError {
    #[error("{0}")]
    Tracing(#[from] TracingInitError),

    #[error("{0}")]
    SystemLoading(#[from] SystemLoadingError),
}

/// Initialize the server by:
/// - Initializing tracing
/// - Loading the service's dataset and creating the system router (and return it)
pub fn init(service: Service, env: Arc<dyn Environment>) -> Result<SystemRouter, ServerInitError> {
    logging_tracing::init()?;

    create_router(service, env)
}

/// Create the system router without touching global state.
pub fn create_router(
    service: Service,
    env: Arc<dyn Environment>,
) -> Result<SystemRouter, ServerInitError> {
    tracing::debug!("Creating the {service:?} router");

    Ok(create_system_router(
        service.static_loaders(),
        service.playground_page(),
        env,
    )?)
}
