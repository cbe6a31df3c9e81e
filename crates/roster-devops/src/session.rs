// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use roster_common_secret::SecretString;
use roster_directory::Identity;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument, trace};
use url::Url;

use crate::endpoints::{join, ServiceEndpoints};
use crate::error::DevOpsError;
use crate::wire::ConnectionData;

pub(crate) const API_VERSION: &str = "7.1";
pub(crate) const PREVIEW_API_VERSION: &str = "7.1-preview.1";

/// Client and credentials; every request goes through here.
#[derive(Debug)]
struct Transport {
	client: Client,
	pat: SecretString,
}

/// An authenticated connection shared by the service implementations.
///
/// Built once per run by [`connect`] and read-only afterwards.
#[derive(Debug)]
pub struct AuthenticatedSession {
	transport: Transport,
	endpoints: ServiceEndpoints,
	authorized: Identity,
}

/// Open a session with a personal access token and read the authorized
/// identity from `connectionData`.
#[instrument(skip(pat), fields(account = %endpoints.account))]
pub async fn connect(
	endpoints: ServiceEndpoints,
	pat: SecretString,
	timeout: Duration,
) -> Result<Arc<AuthenticatedSession>, DevOpsError> {
	let client = roster_common_http::new_client_with_timeout(timeout).map_err(DevOpsError::Client)?;
	let transport = Transport { client, pat };

	let url = join(&endpoints.account, &["_apis", "connectionData"])?;
	let request = transport.client.get(with_api_version(url, PREVIEW_API_VERSION));
	let data: ConnectionData = transport.execute(request).await?;

	let authorized: Identity = data.authenticated_user.into();
	debug!(identity_id = %authorized.id, descriptor = %authorized.descriptor, "authenticated");

	Ok(Arc::new(AuthenticatedSession {
		transport,
		endpoints,
		authorized,
	}))
}

impl AuthenticatedSession {
	pub fn endpoints(&self) -> &ServiceEndpoints {
		&self.endpoints
	}

	/// The identity the access token belongs to.
	pub fn authorized_identity(&self) -> &Identity {
		&self.authorized
	}

	pub(crate) async fn get_json<T: DeserializeOwned>(
		&self,
		url: Url,
		api_version: &str,
	) -> Result<T, DevOpsError> {
		let request = self.transport.client.get(with_api_version(url, api_version));
		self.transport.execute(request).await
	}

	pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
		&self,
		url: Url,
		api_version: &str,
		body: &B,
	) -> Result<T, DevOpsError> {
		let request = self.transport.client.put(with_api_version(url, api_version)).json(body);
		self.transport.execute(request).await
	}

	pub(crate) async fn put_empty<T: DeserializeOwned>(
		&self,
		url: Url,
		api_version: &str,
	) -> Result<T, DevOpsError> {
		let request = self
			.transport
			.client
			.put(with_api_version(url, api_version))
			.body(Vec::new());
		self.transport.execute(request).await
	}
}

impl Transport {
	async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DevOpsError> {
		let response = request
			.basic_auth("", Some(self.pat.expose()))
			.send()
			.await
			.map_err(|e| {
				let err = DevOpsError::from_send(e);
				error!(error = %err, retryable = err.is_retryable(), "request failed");
				err
			})?;

		let status = response.status();
		let url = response.url().clone();
		debug!(%status, path = url.path(), "response received");

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let err = status_error(status.as_u16(), body, url.path());
			error!(
				status = status.as_u16(),
				error = %err,
				retryable = err.is_retryable(),
				"request rejected"
			);
			return Err(err);
		}

		let body = response.text().await.map_err(DevOpsError::from_send)?;
		trace!(body = %body, "response body");

		serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, path = url.path(), "failed to parse response");
			DevOpsError::InvalidResponse(format!("JSON parse error: {e}"))
		})
	}
}

fn with_api_version(mut url: Url, api_version: &str) -> Url {
	url.query_pairs_mut().append_pair("api-version", api_version);
	url
}

pub(crate) fn status_error(status: u16, body: String, path: &str) -> DevOpsError {
	match status {
		401 | 403 => DevOpsError::Unauthorized {
			status,
			message: body,
		},
		404 => DevOpsError::NotFound(path.to_string()),
		429 => DevOpsError::RateLimited,
		_ => DevOpsError::Api {
			status,
			message: body,
		},
	}
}
