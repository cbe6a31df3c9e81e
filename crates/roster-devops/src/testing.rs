// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mock-server helpers shared by the service tests.

use std::sync::Arc;
use std::time::Duration;

use roster_common_secret::SecretString;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::endpoints::ServiceEndpoints;
use crate::session::{connect, AuthenticatedSession};

pub(crate) const CALLER_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

/// Connect to `server` with every service served from its root.
pub(crate) async fn session(server: &MockServer) -> Arc<AuthenticatedSession> {
	Mock::given(method("GET"))
		.and(path("/_apis/connectionData"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"authenticatedUser": {
				"id": CALLER_ID,
				"descriptor": "Microsoft.IdentityModel.Claims.ClaimsIdentity;tenant\\admin@x.com",
				"providerDisplayName": "Admin"
			}
		})))
		.mount(server)
		.await;

	let endpoints = ServiceEndpoints::uniform(Url::parse(&server.uri()).unwrap());
	connect(endpoints, SecretString::new("secret".into()), Duration::from_secs(5))
		.await
		.unwrap()
}
