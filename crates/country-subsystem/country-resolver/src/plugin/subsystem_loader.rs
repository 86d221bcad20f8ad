// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;
use std::sync::Arc;

use almanac_env::{EnvError, Environment};
use common::env_const::{ALMANAC_CREATE_ID_MODE, get_data_file};
use core_resolver::plugin::{SubsystemLoader, SubsystemLoadingError, SubsystemResolver};
use dataset_store::{Dataset, IdAssignment};
use tracing::info;

use crate::{model::Country, rest_resolver::CountryRestResolver};

use super::CountrySubsystemResolver;

pub struct CountrySubsystemLoader {}

impl SubsystemLoader for CountrySubsystemLoader {
    fn id(&self) -> &'static str {
        "countries"
    }

    fn init(&self, env: &dyn Environment) -> Result<SubsystemResolver, SubsystemLoadingError> {
        let data_file = get_data_file(env, self.id());
        let dataset = Arc::new(Dataset::<Country>::load(Path::new(&data_file))?);
        info!("Loaded {} countries from {data_file}", dataset.len());

        let id_assignment = id_assignment(env)?;

        Ok(SubsystemResolver {
            id: self.id(),
            graphql: Some(Arc::new(CountrySubsystemResolver::new(
                self.id(),
                dataset.clone(),
                id_assignment,
            )?)),
            rest: Some(Box::new(CountryRestResolver::new(dataset))),
        })
    }
}

fn id_assignment(env: &dyn Environment) -> Result<IdAssignment, EnvError> {
    match env.get(ALMANAC_CREATE_ID_MODE) {
        Some(mode) => mode.parse().map_err(|message| EnvError::InvalidEnum {
            env_key: ALMANAC_CREATE_ID_MODE,
            env_value: mode,
            message,
        }),
        None => Ok(IdAssignment::default()),
    }
}

#[cfg(test)]
mod tests {
    use almanac_env::MapEnvironment;
    use common::env_const::ALMANAC_DATA_FILE;

    use super::*;

    fn data_file() -> String {
        format!("{}/../../../data/countries.json", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn loads_repository_dataset() {
        let env = MapEnvironment::from([(ALMANAC_DATA_FILE, data_file().as_str())]);

        let resolver = CountrySubsystemLoader {}.init(&env).unwrap();

        assert_eq!(resolver.id, "countries");
        assert!(resolver.graphql.is_some());
        assert!(resolver.rest.is_some());
    }

    #[test]
    fn missing_dataset_is_fatal() {
        let env = MapEnvironment::from([(ALMANAC_DATA_FILE, "does/not/exist.json")]);

        assert!(matches!(
            CountrySubsystemLoader {}.init(&env),
            Err(SubsystemLoadingError::Load(_))
        ));
    }

    #[test]
    fn id_mode_from_env() {
        let mode =
            |value: &str| id_assignment(&MapEnvironment::from([(ALMANAC_CREATE_ID_MODE, value)]));

        assert_eq!(id_assignment(&MapEnvironment::new()).unwrap(), IdAssignment::default());
        assert_eq!(mode("Sequential").unwrap(), IdAssignment::Sequential);
        assert!(matches!(mode("random"), Err(EnvError::InvalidEnum { .. })));
    }
}
