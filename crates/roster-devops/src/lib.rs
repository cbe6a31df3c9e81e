// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Azure DevOps / VSTS binding of the directory, licensing, and project
//! services.
//!
//! ```ignore
//! let endpoints = ServiceEndpoints::from_account_url("https://dev.azure.com/contoso")?;
//! let session = roster_devops::connect(endpoints, pat, Duration::from_secs(30)).await?;
//! let directory = DevOpsDirectory::new(session.clone());
//! ```

mod endpoints;
mod error;
mod identity;
mod licensing;
mod projects;
mod session;
#[cfg(test)]
mod testing;
mod wire;

pub use endpoints::ServiceEndpoints;
pub use error::DevOpsError;
pub use identity::DevOpsDirectory;
pub use licensing::DevOpsLicensing;
pub use projects::DevOpsProjects;
pub use session::{connect, AuthenticatedSession};
