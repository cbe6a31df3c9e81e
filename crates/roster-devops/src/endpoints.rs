// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Base URLs of the account, identity (vssps), and licensing (vsaex) services.

use url::Url;

use crate::error::DevOpsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
	pub account: Url,
	pub identity: Url,
	pub licensing: Url,
}

impl ServiceEndpoints {
	/// Derive the service hosts from an account URL.
	///
	/// - `https://dev.azure.com/{org}` uses `vssps.dev.azure.com/{org}` and
	///   `vsaex.dev.azure.com/{org}`
	/// - `https://{org}.visualstudio.com` uses `{org}.vssps.visualstudio.com`
	///   and `{org}.vsaex.visualstudio.com`
	/// - anything else serves all three from the account URL
	pub fn from_account_url(account_url: &str) -> Result<Self, DevOpsError> {
		let invalid = |reason: &str| DevOpsError::InvalidUrl {
			url: account_url.to_string(),
			reason: reason.to_string(),
		};

		let account = Url::parse(account_url.trim()).map_err(|e| invalid(&e.to_string()))?;
		if !matches!(account.scheme(), "http" | "https") {
			return Err(invalid("scheme must be http or https"));
		}
		let host = account.host_str().ok_or_else(|| invalid("missing host"))?;

		if host.eq_ignore_ascii_case("dev.azure.com") {
			let org = account
				.path_segments()
				.and_then(|mut segments| segments.next())
				.filter(|org| !org.is_empty())
				.ok_or_else(|| invalid("missing organization in path"))?;
			return Ok(Self {
				identity: with_host(&account, "vssps.dev.azure.com", Some(org))?,
				licensing: with_host(&account, "vsaex.dev.azure.com", Some(org))?,
				account: with_host(&account, host, Some(org))?,
			});
		}

		if let Some(org) = host.strip_suffix(".visualstudio.com") {
			if !org.is_empty() && !org.contains('.') {
				return Ok(Self {
					identity: with_host(&account, &format!("{org}.vssps.visualstudio.com"), None)?,
					licensing: with_host(&account, &format!("{org}.vsaex.visualstudio.com"), None)?,
					account: with_host(&account, host, None)?,
				});
			}
		}

		Ok(Self::uniform(account))
	}

	/// All services at one base URL. On-premises servers and mock servers use
	/// this form.
	pub fn uniform(base: Url) -> Self {
		Self {
			account: base.clone(),
			identity: base.clone(),
			licensing: base,
		}
	}
}

fn with_host(template: &Url, host: &str, org: Option<&str>) -> Result<Url, DevOpsError> {
	let path = org.map_or_else(String::new, |org| format!("/{org}"));
	let raw = format!("{}://{host}{path}", template.scheme());
	Url::parse(&raw).map_err(|e| DevOpsError::InvalidUrl {
		url: raw,
		reason: e.to_string(),
	})
}

/// `base` with `segments` appended to its path, each percent-encoded.
pub(crate) fn join(base: &Url, segments: &[&str]) -> Result<Url, DevOpsError> {
	let mut url = base.clone();
	url.path_segments_mut()
		.map_err(|()| DevOpsError::InvalidUrl {
			url: base.to_string(),
			reason: "URL cannot be a base".to_string(),
		})?
		.pop_if_empty()
		.extend(segments);
	Ok(url)
}
