// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use roster_directory::{DirectoryService, ResolvedIdentity, SearchFilter, ServiceError};

/// Looks up an existing identity for an email address.
///
/// "Not found" is `Ok(None)`; only remote failures are errors.
#[derive(Clone)]
pub struct IdentityResolver {
	directory: Arc<dyn DirectoryService>,
}

impl IdentityResolver {
	pub fn new(directory: Arc<dyn DirectoryService>) -> Self {
		Self { directory }
	}

	/// Search by account name, then by mail address. Both searches use the
	/// full address.
	#[tracing::instrument(skip(self))]
	pub async fn resolve(&self, email: &str) -> Result<Option<ResolvedIdentity>, ServiceError> {
		if let Some(found) = self.resolve_by_account_name(email).await? {
			return Ok(Some(found));
		}

		let local_part = email.split_once('@').map_or(email, |(local, _)| local);
		tracing::debug!(local_part, "no account name match, searching by mail address");

		let matches = self
			.directory
			.search_identities(SearchFilter::MailAddress, email)
			.await?;
		Ok(matches.into_iter().next().map(ResolvedIdentity::from))
	}

	pub async fn resolve_by_account_name(
		&self,
		email: &str,
	) -> Result<Option<ResolvedIdentity>, ServiceError> {
		let matches = self
			.directory
			.search_identities(SearchFilter::AccountName, email)
			.await?;
		Ok(matches.into_iter().next().map(ResolvedIdentity::from))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fakes::FakeDirectory;

	#[tokio::test]
	async fn account_name_match_wins() {
		let directory = Arc::new(FakeDirectory::default());
		let by_account = directory.add_identity("a@x.com", None);
		directory.add_identity("other", Some("a@x.com"));

		let resolver = IdentityResolver::new(directory.clone());
		let found = resolver.resolve("a@x.com").await.unwrap().unwrap();

		assert_eq!(found.id, by_account);
		assert_eq!(directory.searches(), vec![(SearchFilter::AccountName, "a@x.com".to_string())]);
	}

	#[tokio::test]
	async fn falls_back_to_mail_address_with_full_email() {
		let directory = Arc::new(FakeDirectory::default());
		let by_mail = directory.add_identity("CONTOSO\\alias", Some("a@x.com"));

		let resolver = IdentityResolver::new(directory.clone());
		let found = resolver.resolve("a@x.com").await.unwrap().unwrap();

		assert_eq!(found.id, by_mail);
		assert_eq!(
			directory.searches(),
			vec![
				(SearchFilter::AccountName, "a@x.com".to_string()),
				(SearchFilter::MailAddress, "a@x.com".to_string()),
			]
		);
	}

	#[tokio::test]
	async fn no_match_is_none_not_error() {
		let directory = Arc::new(FakeDirectory::default());
		let resolver = IdentityResolver::new(directory);
		assert_eq!(resolver.resolve("nobody@x.com").await.unwrap(), None);
	}

	#[tokio::test]
	async fn search_failure_is_propagated() {
		let directory = Arc::new(FakeDirectory::default());
		directory.fail_search_for("a@x.com", ServiceError::Timeout);
		let resolver = IdentityResolver::new(directory);
		assert_eq!(resolver.resolve("a@x.com").await.unwrap_err(), ServiceError::Timeout);
	}
}
