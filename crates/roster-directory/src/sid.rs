// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Security identifier (SID) derivation for collection-scoped groups.
//!
//! Built-in groups such as "Licensed Users" have one global, well-known SID.
//! Each collection holds its own instance of that group, whose SID is formed
//! by swapping the well-known domain for the collection's domain:
//!
//! ```text
//! well-known:   S-1-9-1551374245-1204400969-2402986413-2179408616-0-0-0-0-3
//!               \________________ well-known prefix ________________/
//! scoped:       S-1-9-1551374245-<a>-<b>-<c>-<d>-0-0-0-0-3
//!               \_____ domain SID of scope ____/
//! ```

use uuid::Uuid;

use crate::descriptor::IdentityDescriptor;
use crate::error::MalformedIdentifierError;

/// Prefix shared by every Team Foundation SID.
pub const TEAM_FOUNDATION_SID_PREFIX: &str = "S-1-9-1551374245-";

/// Domain SID that owns the globally well-known groups.
pub const WELL_KNOWN_DOMAIN_SID: &str = "S-1-9-1551374245-1204400969-2402986413-2179408616";

/// Marker between a domain SID and a well-known group suffix.
pub const WELL_KNOWN_SID_TYPE: &str = "-0-";

/// `WELL_KNOWN_DOMAIN_SID` followed by `WELL_KNOWN_SID_TYPE`.
pub const WELL_KNOWN_SID_PREFIX: &str = "S-1-9-1551374245-1204400969-2402986413-2179408616-0-";

/// SID of the built-in licensed users group.
pub const LICENSED_USERS_GROUP_SID: &str =
	"S-1-9-1551374245-1204400969-2402986413-2179408616-0-0-0-0-3";

/// Descriptor of the global licensed users group.
pub fn licensed_users_group() -> IdentityDescriptor {
	IdentityDescriptor::team_foundation(LICENSED_USERS_GROUP_SID)
}

/// Domain SID of a scope: the Team Foundation prefix followed by the scope
/// id's bytes (in little-endian GUID layout) read as four `u32` values.
pub fn domain_sid(scope_id: Uuid) -> String {
	let bytes = scope_id.to_bytes_le();
	let parts: Vec<String> = bytes
		.chunks_exact(4)
		.map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]).to_string())
		.collect();
	format!("{TEAM_FOUNDATION_SID_PREFIX}{}", parts.join("-"))
}

/// Derive the collection-scoped instance of a well-known group.
///
/// The result keeps the template's identity type; only the identifier is
/// rewritten. Fails without side effects when the template identifier is not
/// a well-known SID.
///
/// Besides rejecting identifiers shorter than the well-known prefix, this
/// also rejects identifiers of sufficient length that do not start with it,
/// rather than splicing their tail onto the collection domain.
pub fn derive_scoped_group_descriptor(
	collection_scope_id: Uuid,
	well_known: &IdentityDescriptor,
) -> Result<IdentityDescriptor, MalformedIdentifierError> {
	let identifier = &well_known.identifier;
	if identifier.len() < WELL_KNOWN_SID_PREFIX.len() {
		return Err(MalformedIdentifierError::TooShort {
			identifier: identifier.clone(),
			prefix_len: WELL_KNOWN_SID_PREFIX.len(),
		});
	}
	let suffix = identifier
		.strip_prefix(WELL_KNOWN_SID_PREFIX)
		.ok_or_else(|| MalformedIdentifierError::NotWellKnown {
			identifier: identifier.clone(),
		})?;

	Ok(IdentityDescriptor::new(
		well_known.identity_type.clone(),
		format!(
			"{}{WELL_KNOWN_SID_TYPE}{suffix}",
			domain_sid(collection_scope_id)
		),
	))
}
