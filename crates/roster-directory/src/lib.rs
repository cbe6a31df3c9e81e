// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity directory model for roster.
//!
//! This crate provides:
//! - Typed descriptors for directory identities and groups
//! - Derivation of collection-scoped well-known group descriptors
//! - License tiers and their textual forms
//! - The capability traits the provisioning workflow consumes
//!
//! Nothing here performs I/O. Remote bindings live in `roster-devops`.

pub mod descriptor;
pub mod error;
pub mod license;
pub mod model;
pub mod service;
pub mod sid;

pub use descriptor::{
	DescriptorKind, IdentityDescriptor, BIND_PENDING_TYPE, CLAIMS_TYPE, TEAM_FOUNDATION_TYPE,
};
pub use error::{MalformedIdentifierError, ServiceError};
pub use license::{LicenseSource, LicenseTier, UnknownLicenseError};
pub use model::{Entitlement, Group, Identity, Project, ResolvedIdentity, Scope, SearchFilter};
pub use service::{DirectoryService, LicensingService, ProjectService};
pub use sid::{
	derive_scoped_group_descriptor, domain_sid, licensed_users_group, LICENSED_USERS_GROUP_SID,
	WELL_KNOWN_SID_PREFIX,
};
