// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use actix_web::web;
use almanac_env::MapEnvironment;
use common::env_const::ALMANAC_DATA_FILE;
use server_common::{Service, create_router};
use system_router::SystemRouter;

/// A router over the repository's dataset for `service`.
pub fn system_router(service: Service, overrides: &[(&str, &str)]) -> web::Data<SystemRouter> {
    let dataset = match service {
        Service::Countries => "countries",
        Service::Champions => "champions",
    };
    let data_file = format!("{}/../../data/{dataset}.json", env!("CARGO_MANIFEST_DIR"));

    let mut env = MapEnvironment::from([(ALMANAC_DATA_FILE, data_file.as_str())]);
    for (key, value) in overrides {
        env.set(key, value);
    }

    web::Data::new(create_router(service, Arc::new(env)).unwrap())
}
