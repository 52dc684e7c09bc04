// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! FinanceFlow keeps an append-only ledger of income and expense
//! transactions in SQLite and derives summaries, monthly rollups and
//! category breakdowns from it.

pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod store;
pub mod utils;
pub mod validation;
