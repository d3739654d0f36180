// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lookup of a workspace's current state in Terraform Cloud / Enterprise.

mod client;
mod fetcher;
mod types;

pub use client::TfeClient;
pub use fetcher::{FetchError, StateFetcher};
