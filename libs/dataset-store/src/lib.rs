// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! An in-memory, append-only collection of records loaded once from a JSON array.

mod dataset;
mod id_assignment;
mod load_error;
pub mod query;

pub use dataset::{Dataset, Identified};
pub use id_assignment::{FIXED_CREATED_ID, IdAssignment};
pub use load_error::LoadError;
