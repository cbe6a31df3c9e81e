// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading secrets from `VAR` or `VAR_FILE` environment variables.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::SecretString;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load `var` as a secret.
///
/// `{var}_FILE` wins over `{var}`; a single trailing newline is stripped from
/// file contents. Returns `Ok(None)` when neither is set or the value is empty.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path) = env::var(&file_var) {
		if path.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}
		let path = PathBuf::from(path);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;
		let value = content
			.strip_suffix("\r\n")
			.or_else(|| content.strip_suffix('\n'))
			.unwrap_or(&content);
		return Ok(non_empty(value));
	}

	match env::var(var) {
		Ok(value) => Ok(non_empty(&value)),
		Err(_) => Ok(None),
	}
}

fn non_empty(value: &str) -> Option<SecretString> {
	if value.is_empty() {
		None
	} else {
		Some(SecretString::new(value.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	// Each test uses its own variable name; the process environment is shared.

	#[test]
	fn unset_variable_yields_none() {
		let var = "ROSTER_TEST_SECRET_UNSET";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn direct_variable_is_read() {
		let var = "ROSTER_TEST_SECRET_DIRECT";
		env::remove_var(format!("{var}_FILE"));
		env::set_var(var, "direct");
		assert_eq!(load_secret_env(var).unwrap().unwrap().expose(), "direct");
		env::remove_var(var);
	}

	#[test]
	fn file_variable_wins_and_trailing_newline_is_stripped() {
		let var = "ROSTER_TEST_SECRET_FILE";
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "from-file").unwrap();

		env::set_var(var, "direct");
		env::set_var(format!("{var}_FILE"), file.path());
		assert_eq!(load_secret_env(var).unwrap().unwrap().expose(), "from-file");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_an_error() {
		let var = "ROSTER_TEST_SECRET_EMPTY_PATH";
		env::set_var(format!("{var}_FILE"), "");
		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::EmptyPath { .. })
		));
		env::remove_var(format!("{var}_FILE"));
	}
}
