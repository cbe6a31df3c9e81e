// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Append-only record of requests that failed, one `<email>, failed, <cause>`
//! line each.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// The file is opened in append mode on the first failure and kept open for
/// the rest of the run. Each entry is flushed as soon as it is written.
pub struct QuarantineLog {
	path: PathBuf,
	file: Option<File>,
}

impl QuarantineLog {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			file: None,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub async fn record(&mut self, email: &str, cause: &(dyn Display + Sync)) -> io::Result<()> {
		let line = format_entry(email, cause);
		let file = match self.file.take() {
			Some(file) => file,
			None => {
				OpenOptions::new()
					.create(true)
					.append(true)
					.open(&self.path)
					.await?
			}
		};
		let file = self.file.insert(file);
		file.write_all(line.as_bytes()).await?;
		file.flush().await?;
		Ok(())
	}
}

/// One log line, newline-terminated. Line breaks inside the cause are
/// flattened so each failure stays on one line.
pub fn format_entry(email: &str, cause: &dyn Display) -> String {
	let cause = cause.to_string().replace(['\r', '\n'], " ");
	format!("{email}, failed, {cause}\n")
}
