// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON shapes of the REST API.

use roster_directory::{
	Group, Identity, IdentityDescriptor, LicenseSource, LicenseTier, Project, Scope,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `{ "count": n, "value": [...] }`; only `value` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
	pub value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConnectionData {
	pub authenticated_user: WireIdentity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireIdentity {
	pub id: Uuid,
	pub descriptor: IdentityDescriptor,
	#[serde(default)]
	pub provider_display_name: Option<String>,
	#[serde(default)]
	pub custom_display_name: Option<String>,
}

impl WireIdentity {
	fn display_name(&self) -> Option<String> {
		self.custom_display_name
			.clone()
			.or_else(|| self.provider_display_name.clone())
	}
}

impl From<WireIdentity> for Identity {
	fn from(wire: WireIdentity) -> Self {
		let display_name = wire.display_name();
		Identity {
			id: wire.id,
			descriptor: wire.descriptor,
			display_name,
		}
	}
}

/// Groups come back as identities; their provider display name carries the
/// `[Project]\Group` form that suffix matching runs against.
impl From<WireIdentity> for Group {
	fn from(wire: WireIdentity) -> Self {
		Group {
			display_name: wire.provider_display_name.unwrap_or_default(),
			descriptor: wire.descriptor,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireScope {
	pub id: Uuid,
	pub name: String,
}

impl From<WireScope> for Scope {
	fn from(wire: WireScope) -> Self {
		Scope {
			id: wire.id,
			name: wire.name,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireProject {
	pub id: Uuid,
	pub name: String,
}

impl From<WireProject> for Project {
	fn from(wire: WireProject) -> Self {
		Project {
			id: wire.id,
			name: wire.name,
		}
	}
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntitlementUpdate {
	pub licensing_source: &'static str,
	pub account_license_type: &'static str,
	pub msdn_license_type: &'static str,
}

impl From<LicenseTier> for EntitlementUpdate {
	fn from(tier: LicenseTier) -> Self {
		let (licensing_source, account_license_type, msdn_license_type) = match tier.source() {
			LicenseSource::Msdn => ("msdn", "none", "eligible"),
			LicenseSource::Account => {
				let account = match tier {
					LicenseTier::Basic => "express",
					LicenseTier::Professional => "professional",
					LicenseTier::Advanced => "advanced",
					LicenseTier::Stakeholder => "stakeholder",
					LicenseTier::MsdnEligible => "none",
				};
				("account", account, "none")
			}
		};
		Self {
			licensing_source,
			account_license_type,
			msdn_license_type,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEntitlement {
	pub user_id: Uuid,
}
