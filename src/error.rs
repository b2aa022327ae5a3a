//! Error types for proxy-state.
//!
//! The error surface is deliberately small: only *construction* of a state
//! container from caller-supplied data can fail. Reads of absent keys are
//! `None`, and writes always succeed (see [`ProxyState::set`]).
//!
//! [`ProxyState::set`]: crate::store::ProxyState::set

use thiserror::Error;

/// Errors raised while building a [`ProxyState`](crate::store::ProxyState)
/// from caller-supplied initial state.
#[derive(Debug, Error)]
pub enum StateError {
	/// The initial state was not a key/value object.
	///
	/// Per-property interception needs a structured value; scalars, arrays
	/// and `null` have no properties to intercept.
	#[error("initial state must be an object, found {found}")]
	NotAnObject {
		/// Human-readable description of what was supplied instead.
		found: &'static str,
	},

	/// Serializing a value into the store representation failed.
	#[error("failed to serialize state value: {0}")]
	Serialize(#[from] serde_json::Error),
}
