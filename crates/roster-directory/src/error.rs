// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types shared by the directory model and its remote bindings.

use thiserror::Error;

/// An identifier or descriptor whose string layout cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedIdentifierError {
	/// The identifier is shorter than the well-known SID prefix.
	#[error("identifier '{identifier}' is shorter than the well-known SID prefix ({prefix_len} chars)")]
	TooShort {
		identifier: String,
		prefix_len: usize,
	},

	/// The identifier is long enough but is not a well-known SID.
	#[error("identifier '{identifier}' does not start with the well-known SID prefix")]
	NotWellKnown { identifier: String },

	/// A descriptor string without the `<type>;<identifier>` shape.
	#[error("descriptor '{0}' is not of the form '<type>;<identifier>'")]
	Descriptor(String),
}

/// Failure of a remote capability call.
///
/// Bindings map their transport-specific errors into this type so the
/// provisioning workflow never sees HTTP details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
	#[error("transport error: {0}")]
	Transport(String),

	#[error("request timed out")]
	Timeout,

	#[error("unauthorized: {0}")]
	Unauthorized(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("rate limited")]
	RateLimited,

	#[error("service error: {status} - {message}")]
	Api { status: u16, message: String },

	#[error("invalid response: {0}")]
	InvalidResponse(String),
}

impl ServiceError {
	/// Whether a later attempt could plausibly succeed.
	pub fn is_retryable(&self) -> bool {
		match self {
			ServiceError::Transport(_) | ServiceError::Timeout | ServiceError::RateLimited => true,
			ServiceError::Api { status, .. } => *status >= 500,
			ServiceError::Unauthorized(_)
			| ServiceError::NotFound(_)
			| ServiceError::InvalidResponse(_) => false,
		}
	}
}
