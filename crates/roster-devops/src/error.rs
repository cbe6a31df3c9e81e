// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_directory::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevOpsError {
	/// Connection-level failure before a response arrived.
	#[error("network error: {0}")]
	Network(#[source] reqwest::Error),

	#[error("request timed out")]
	Timeout,

	/// 401 or 403. Usually an expired token or one missing a scope.
	#[error("unauthorized ({status}): {message}")]
	Unauthorized { status: u16, message: String },

	#[error("not found: {0}")]
	NotFound(String),

	#[error("rate limit exceeded")]
	RateLimited,

	#[error("API error: {status} - {message}")]
	Api { status: u16, message: String },

	#[error("invalid response: {0}")]
	InvalidResponse(String),

	#[error("invalid account URL '{url}': {reason}")]
	InvalidUrl { url: String, reason: String },

	#[error("failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),
}

impl DevOpsError {
	pub(crate) fn from_send(error: reqwest::Error) -> Self {
		if error.is_timeout() {
			DevOpsError::Timeout
		} else {
			DevOpsError::Network(error)
		}
	}

	pub fn is_retryable(&self) -> bool {
		match self {
			DevOpsError::Network(_) | DevOpsError::Timeout | DevOpsError::RateLimited => true,
			DevOpsError::Api { status, .. } => *status >= 500,
			DevOpsError::Unauthorized { .. }
			| DevOpsError::NotFound(_)
			| DevOpsError::InvalidResponse(_)
			| DevOpsError::InvalidUrl { .. }
			| DevOpsError::Client(_) => false,
		}
	}
}

impl From<DevOpsError> for ServiceError {
	fn from(error: DevOpsError) -> Self {
		match error {
			DevOpsError::Network(e) => ServiceError::Transport(e.to_string()),
			DevOpsError::Client(e) => ServiceError::Transport(e.to_string()),
			DevOpsError::Timeout => ServiceError::Timeout,
			DevOpsError::Unauthorized { message, .. } => ServiceError::Unauthorized(message),
			DevOpsError::NotFound(what) => ServiceError::NotFound(what),
			DevOpsError::RateLimited => ServiceError::RateLimited,
			DevOpsError::Api { status, message } => ServiceError::Api { status, message },
			DevOpsError::InvalidResponse(reason) => ServiceError::InvalidResponse(reason),
			DevOpsError::InvalidUrl { url, reason } => {
				ServiceError::InvalidResponse(format!("{url}: {reason}"))
			}
		}
	}
}
