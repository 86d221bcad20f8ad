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

use almanac_env::Environment;
use common::env_const::get_data_file;
use core_resolver::plugin::{SubsystemLoader, SubsystemLoadingError, SubsystemResolver};
use dataset_store::Dataset;
use tracing::info;

use crate::model::Champion;

use super::ChampionSubsystemResolver;

pub struct ChampionSubsystemLoader {}

impl SubsystemLoader for ChampionSubsystemLoader {
    fn id(&self) -> &'static str {
        "champions"
    }

    fn init(&self, env: &dyn Environment) -> Result<SubsystemResolver, SubsystemLoadingError> {
        let data_file = get_data_file(env, self.id());
        let dataset = Dataset::<Champion>::load(Path::new(&data_file))?;
        info!("Loaded {} champions from {data_file}", dataset.len());

        Ok(SubsystemResolver {
            id: self.id(),
            graphql: Some(Arc::new(ChampionSubsystemResolver::new(
                self.id(),
                Arc::new(dataset),
            )?)),
            rest: None,
        })
    }
}
