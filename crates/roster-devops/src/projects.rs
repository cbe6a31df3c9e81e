// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use roster_directory::{Project, ProjectService, ServiceError};
use tracing::instrument;

use crate::endpoints::join;
use crate::session::{AuthenticatedSession, API_VERSION};
use crate::wire::WireProject;

/// [`ProjectService`] over the account's core project endpoint.
#[derive(Debug, Clone)]
pub struct DevOpsProjects {
	session: Arc<AuthenticatedSession>,
}

impl DevOpsProjects {
	pub fn new(session: Arc<AuthenticatedSession>) -> Self {
		Self { session }
	}
}

#[async_trait]
impl ProjectService for DevOpsProjects {
	#[instrument(skip(self))]
	async fn get_project(&self, name: &str) -> Result<Project, ServiceError> {
		let url = join(&self.session.endpoints().account, &["_apis", "projects", name])?;
		let project: WireProject = self.session.get_json(url, API_VERSION).await?;
		Ok(project.into())
	}
}
