// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use roster_directory::{Entitlement, LicenseTier, LicensingService, ServiceError};
use tracing::instrument;
use uuid::Uuid;

use crate::endpoints::join;
use crate::session::{AuthenticatedSession, PREVIEW_API_VERSION};
use crate::wire::{EntitlementUpdate, WireEntitlement};

/// [`LicensingService`] over the user entitlement (vsaex) endpoint.
#[derive(Debug, Clone)]
pub struct DevOpsLicensing {
	session: Arc<AuthenticatedSession>,
}

impl DevOpsLicensing {
	pub fn new(session: Arc<AuthenticatedSession>) -> Self {
		Self { session }
	}
}

#[async_trait]
impl LicensingService for DevOpsLicensing {
	#[instrument(skip(self))]
	async fn assign_entitlement(
		&self,
		identity_id: Uuid,
		license: LicenseTier,
	) -> Result<Entitlement, ServiceError> {
		let url = join(
			&self.session.endpoints().licensing,
			&["_apis", "licensing", "entitlements", identity_id.to_string().as_str()],
		)?;
		let body = EntitlementUpdate::from(license);

		let assigned: WireEntitlement = self.session.put_json(url, PREVIEW_API_VERSION, &body).await?;
		Ok(Entitlement {
			identity_id: assigned.user_id,
			license,
		})
	}
}
