// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// License entitlement tier assigned to a provisioned identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTier {
	/// Account "Express" license.
	Basic,
	Professional,
	Advanced,
	/// Subscriber benefits resolved by the service at first sign-in.
	#[serde(rename = "msdn")]
	MsdnEligible,
	Stakeholder,
}

/// Where a license tier is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseSource {
	Account,
	Msdn,
}

/// Textual license value outside the accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown license '{0}': expected one of basic, professional, advanced, msdn, stakeholder")]
pub struct UnknownLicenseError(pub String);

impl LicenseTier {
	pub const ALL: [LicenseTier; 5] = [
		LicenseTier::Basic,
		LicenseTier::Professional,
		LicenseTier::Advanced,
		LicenseTier::MsdnEligible,
		LicenseTier::Stakeholder,
	];

	/// The accepted input spelling for this tier.
	pub fn as_str(&self) -> &'static str {
		match self {
			LicenseTier::Basic => "basic",
			LicenseTier::Professional => "professional",
			LicenseTier::Advanced => "advanced",
			LicenseTier::MsdnEligible => "msdn",
			LicenseTier::Stakeholder => "stakeholder",
		}
	}

	pub fn source(&self) -> LicenseSource {
		match self {
			LicenseTier::MsdnEligible => LicenseSource::Msdn,
			_ => LicenseSource::Account,
		}
	}
}

impl fmt::Display for LicenseTier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LicenseTier {
	type Err = UnknownLicenseError;

	/// Case-insensitive; surrounding whitespace is ignored.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().to_ascii_lowercase();
		LicenseTier::ALL
			.into_iter()
			.find(|tier| tier.as_str() == normalized)
			.ok_or_else(|| UnknownLicenseError(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn every_tier_parses_from_its_own_spelling() {
		for tier in LicenseTier::ALL {
			assert_eq!(tier.as_str().parse::<LicenseTier>(), Ok(tier));
		}
	}

	#[test]
	fn msdn_maps_to_eligible_tier() {
		let tier: LicenseTier = "MSDN".parse().unwrap();
		assert_eq!(tier, LicenseTier::MsdnEligible);
		assert_eq!(tier.source(), LicenseSource::Msdn);
		assert_eq!(LicenseTier::Basic.source(), LicenseSource::Account);
	}

	#[test]
	fn unknown_license_is_rejected_not_defaulted() {
		let err = "platinum".parse::<LicenseTier>().unwrap_err();
		assert_eq!(err, UnknownLicenseError("platinum".to_string()));
		assert!("".parse::<LicenseTier>().is_err());
		assert!("express".parse::<LicenseTier>().is_err());
	}

	// Property: any casing of an accepted spelling maps to exactly one tier.
	proptest! {
		#[test]
		fn prop_parse_is_case_insensitive(
			index in 0usize..5,
			mask in prop::collection::vec(any::<bool>(), 12),
		) {
			let tier = LicenseTier::ALL[index];
			let mixed: String = tier
				.as_str()
				.chars()
				.zip(mask.iter().cycle())
				.map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
				.collect();

			let matches: Vec<LicenseTier> = LicenseTier::ALL
				.into_iter()
				.filter(|candidate| mixed.parse::<LicenseTier>() == Ok(*candidate))
				.collect();
			prop_assert_eq!(matches, vec![tier]);
		}

		#[test]
		fn prop_unaccepted_strings_fail(input in "[a-z]{1,12}") {
			let accepted = LicenseTier::ALL.iter().any(|t| t.as_str() == input);
			prop_assert_eq!(input.parse::<LicenseTier>().is_ok(), accepted);
		}
	}
}
