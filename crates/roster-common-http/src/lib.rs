// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction.
//!
//! Every outbound request carries the roster User-Agent and is bounded by a
//! request timeout so an unresponsive endpoint cannot stall a batch.

mod client;

pub use client::{builder, new_client_with_timeout, user_agent, DEFAULT_REQUEST_TIMEOUT};
