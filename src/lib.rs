// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod dashboard;
pub mod db;
pub mod engine;
pub mod errors;
pub mod form;
pub mod loader;
pub mod logging;
pub mod models;
pub mod store;
pub mod utils;
