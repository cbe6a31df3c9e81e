// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Batch file reader. Each row is `email,license`; blank lines and lines
//! starting with `#` are skipped.

use std::path::Path;

use anyhow::{Context, Result};
use roster_directory::LicenseTier;
use roster_provisioning::{ProvisioningRequest, RequestTemplate, ValidationError};

pub async fn read_rows(path: &Path, template: &RequestTemplate) -> Result<Vec<ProvisioningRequest>> {
	let text = tokio::fs::read_to_string(path)
		.await
		.with_context(|| format!("failed to read batch file {}", path.display()))?;
	let requests = parse_rows(&text, template)
		.with_context(|| format!("invalid batch file {}", path.display()))?;
	tracing::debug!(path = %path.display(), rows = requests.len(), "read batch file");
	Ok(requests)
}

/// Parse every row up front. The first bad row fails the whole file, with
/// its 1-based line number.
pub fn parse_rows(text: &str, template: &RequestTemplate) -> Result<Vec<ProvisioningRequest>, ValidationError> {
	let mut requests = Vec::new();

	for (index, raw) in text.lines().enumerate() {
		let line = index + 1;
		let row = raw.trim();
		if row.is_empty() || row.starts_with('#') {
			continue;
		}

		let fields: Vec<&str> = row.split(',').map(str::trim).collect();
		let [email, license] = fields.as_slice() else {
			return Err(ValidationError::RowShape {
				line,
				fields: fields.len(),
			});
		};

		let license: LicenseTier = license
			.parse()
			.map_err(|e| ValidationError::from(e).at_line(line))?;
		let request = template.request(email, license).map_err(|e| e.at_line(line))?;
		requests.push(request);
	}

	Ok(requests)
}
