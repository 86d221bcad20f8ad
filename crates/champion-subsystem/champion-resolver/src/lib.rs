// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod champion_execution_error;
mod model;
mod operation_resolver;

pub mod plugin;

pub use model::{Champion, Champions, Info, NotFoundError, Sprite, Stats};

pub(crate) const CHAMPIONS_SDL: &str = include_str!("champions.graphql");
