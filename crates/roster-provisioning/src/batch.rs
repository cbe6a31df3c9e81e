// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use futures::stream::{self, Stream};

use crate::engine::ProvisioningEngine;
use crate::outcome::{ProvisioningOutcome, QuarantineStatus};
use crate::quarantine::QuarantineLog;
use crate::request::ProvisioningRequest;

/// Provisions requests one after another, recording failures in the
/// quarantine log without stopping.
pub struct BatchRunner {
	engine: ProvisioningEngine,
	quarantine: QuarantineLog,
}

impl BatchRunner {
	pub fn new(engine: ProvisioningEngine, quarantine: QuarantineLog) -> Self {
		Self { engine, quarantine }
	}

	/// Lazily provision `requests` in order, yielding one outcome per request.
	///
	/// The runner is consumed; the next request is not started until the
	/// previous outcome has been polled.
	pub fn run<I>(self, requests: I) -> impl Stream<Item = ProvisioningOutcome>
	where
		I: IntoIterator<Item = ProvisioningRequest>,
	{
		stream::unfold(
			(self, requests.into_iter()),
			|(mut runner, mut requests)| async move {
				let request = requests.next()?;
				let mut outcome = runner.engine.provision(request).await;

				if let Err(error) = &outcome.result {
					outcome.quarantine = match runner.quarantine.record(outcome.email(), error).await {
						Ok(()) => QuarantineStatus::Recorded,
						Err(io_error) => {
							tracing::error!(
								email = outcome.email(),
								path = %runner.quarantine.path().display(),
								error = %io_error,
								"failed to write quarantine entry"
							);
							QuarantineStatus::Lost(io_error.to_string())
						}
					};
				}

				Some((outcome, (runner, requests)))
			},
		)
	}
}
