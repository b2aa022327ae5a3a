//! ProxyState - Intercepting State Container
//!
//! `ProxyState` is the core of the crate: a key/value state object whose
//! writes are intercepted so that every mutation notifies the owning
//! component's [`RenderTrigger`].
//!
//! ## Key Features
//!
//! - **Interception at one point**: every write flows through [`set`] (or
//!   [`update`]), which applies the mutation and then fires the trigger.
//! - **Read-after-write consistency**: the mutation is visible to any read
//!   performed after `set` returns, including reads from within the trigger
//!   callback itself.
//! - **Any-shape writes**: keys absent from the initial state may be
//!   introduced, and a key's value type may change freely. Writes never
//!   fail.
//! - **Isolated backing store**: construction copies the initial state, so
//!   later mutations of the caller's original are never observed.
//!
//! ## Example
//!
//! ```ignore
//! use proxy_state::{ProxyState, RenderTrigger};
//! use serde_json::json;
//!
//! let state = ProxyState::try_from_value(&json!({"count": 0}), trigger)?;
//!
//! state.set("count", 1); // mutation applied, then trigger fires once
//! assert_eq!(state.get_as::<i64>("count"), Some(1));
//! ```
//!
//! [`set`]: ProxyState::set
//! [`update`]: ProxyState::update

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::StateError;
use crate::trigger::RenderTrigger;

/// Human-readable kind of a JSON value, for error messages.
fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

/// A reactive state container whose writes notify a [`RenderTrigger`].
///
/// `ProxyState` owns a private backing store (a `serde_json::Map`) holding
/// the actual values. Reads pass straight through to the store; writes are
/// applied to the store first and then invoke the trigger, one notification
/// per write, with no batching.
///
/// ## Cloning
///
/// `ProxyState` implements `Clone` by sharing the backing store via
/// `Rc<RefCell<..>>`. All clones observe the same values and fire the same
/// trigger; use [`ProxyState::ptr_eq`] to test whether two handles share a
/// store.
///
/// ## Nested values
///
/// Only the store's own direct keys are intercepted. A nested object or
/// array read out with [`get`](Self::get) is an owned copy; mutating that
/// copy does not touch the store and does not notify. To change nested
/// data, write the whole top-level key back with [`set`](Self::set) or
/// mutate it in place with [`update`](Self::update).
///
/// ## Threading
///
/// Single-threaded by construction (`Rc`/`RefCell`); a `ProxyState` never
/// leaves the thread that created it.
pub struct ProxyState {
	/// The backing store, exclusively owned by this container.
	values: Rc<RefCell<Map<String, Value>>>,
	/// The owning component's notification trigger.
	trigger: RenderTrigger,
}

impl Clone for ProxyState {
	fn clone(&self) -> Self {
		Self {
			values: Rc::clone(&self.values),
			trigger: self.trigger.clone(),
		}
	}
}

impl ProxyState {
	/// Creates a container from an initial key/value map.
	///
	/// The map is copied into a fresh backing store, so the caller's
	/// original is never aliased: mutating it afterwards has no effect on
	/// this container. No notification fires during construction.
	///
	/// # Arguments
	///
	/// * `initial` - The initial state
	/// * `trigger` - The notification trigger fired on every write
	pub fn new(initial: &Map<String, Value>, trigger: RenderTrigger) -> Self {
		Self {
			values: Rc::new(RefCell::new(initial.clone())),
			trigger,
		}
	}

	/// Creates a container from a JSON value that must be an object.
	///
	/// Scalars, arrays and `null` are rejected with
	/// [`StateError::NotAnObject`]: per-key interception needs a structured
	/// value.
	///
	/// # Example
	///
	/// ```ignore
	/// let state = ProxyState::try_from_value(&json!({"count": 0}), trigger)?;
	/// assert!(ProxyState::try_from_value(&json!(5), RenderTrigger::noop()).is_err());
	/// ```
	pub fn try_from_value(initial: &Value, trigger: RenderTrigger) -> Result<Self, StateError> {
		match initial {
			Value::Object(map) => Ok(Self::new(map, trigger)),
			other => Err(StateError::NotAnObject {
				found: value_kind(other),
			}),
		}
	}

	/// Creates a container from any serializable value with an object shape.
	///
	/// This is the typed entry point: a plain struct with named fields
	/// serializes to an object and becomes the initial state. Values that
	/// serialize to something other than an object are rejected.
	///
	/// # Example
	///
	/// ```ignore
	/// #[derive(Serialize)]
	/// struct Counter { count: i64 }
	///
	/// let state = ProxyState::from_serialize(&Counter { count: 0 }, trigger)?;
	/// ```
	pub fn from_serialize<T: Serialize>(
		initial: &T,
		trigger: RenderTrigger,
	) -> Result<Self, StateError> {
		match serde_json::to_value(initial)? {
			Value::Object(map) => Ok(Self {
				values: Rc::new(RefCell::new(map)),
				trigger,
			}),
			other => Err(StateError::NotAnObject {
				found: value_kind(&other),
			}),
		}
	}

	/// Returns a copy of the value stored under `key`.
	///
	/// A key that was never written is `None` - absent keys are not an
	/// error. Reads have no side effects and never notify.
	pub fn get(&self, key: &str) -> Option<Value> {
		self.values.borrow().get(key).cloned()
	}

	/// Returns the value stored under `key`, deserialized into `T`.
	///
	/// `None` if the key is absent *or* the stored value does not
	/// deserialize into `T`. Use [`get`](Self::get) when the distinction
	/// matters.
	pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
		self.get(key)
			.and_then(|value| serde_json::from_value(value).ok())
	}

	/// Stores `value` under `key`, then fires the trigger once.
	///
	/// This is the write interceptor. In order: (1) the mutation is applied
	/// to the backing store, (2) the trigger is invoked with no payload.
	/// The write always succeeds - any key is accepted, including keys not
	/// present at construction, and a key's value type may change freely.
	/// Validation, if needed, is a caller concern layered on top.
	///
	/// N sequential calls fire the trigger N times; nothing batches or
	/// deduplicates at this layer.
	///
	/// # Example
	///
	/// ```ignore
	/// state.set("count", 1);
	/// state.set("label", "ready"); // new key, different type - fine
	/// ```
	pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
		// The borrow ends before the trigger runs, so the notified side can
		// read back synchronously.
		self.values.borrow_mut().insert(key.into(), value.into());
		self.trigger.notify();
	}

	/// Serializes `value` and stores it under `key`, then fires the trigger.
	///
	/// Serialization happens *before* the write path is entered; on failure
	/// the store is untouched and no notification fires.
	pub fn set_serialize<T: Serialize>(
		&self,
		key: impl Into<String>,
		value: &T,
	) -> Result<(), StateError> {
		let value = serde_json::to_value(value)?;
		self.set(key, value);
		Ok(())
	}

	/// Mutates the value under `key` in place, then fires the trigger once.
	///
	/// A missing key is seeded with `Value::Null` before `f` runs, so the
	/// closure can build the value from scratch. Exactly one notification
	/// fires however much the closure changes.
	///
	/// # Example
	///
	/// ```ignore
	/// state.update("count", |v| {
	///     *v = json!(v.as_i64().unwrap_or(0) + 1);
	/// });
	/// ```
	pub fn update<F>(&self, key: &str, f: F)
	where
		F: FnOnce(&mut Value),
	{
		{
			let mut values = self.values.borrow_mut();
			let slot = values.entry(key.to_string()).or_insert(Value::Null);
			f(slot);
		}
		self.trigger.notify();
	}

	/// Returns `true` if `key` currently has a stored value.
	pub fn contains_key(&self, key: &str) -> bool {
		self.values.borrow().contains_key(key)
	}

	/// Returns the current set of keys.
	pub fn keys(&self) -> Vec<String> {
		self.values.borrow().keys().cloned().collect()
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.values.borrow().len()
	}

	/// Returns `true` if the store holds no keys.
	pub fn is_empty(&self) -> bool {
		self.values.borrow().is_empty()
	}

	/// Runs `f` with a borrow of the backing store, without cloning.
	///
	/// The borrow is read-only; writes still go through [`set`](Self::set)
	/// so they cannot bypass notification.
	pub fn with<R>(&self, f: impl FnOnce(&Map<String, Value>) -> R) -> R {
		f(&self.values.borrow())
	}

	/// Returns a copy of the entire backing store.
	pub fn snapshot(&self) -> Map<String, Value> {
		self.values.borrow().clone()
	}

	/// The notification trigger this container fires on writes.
	///
	/// Identity is stable for the container's whole lifetime: every write
	/// fires this same trigger.
	pub fn trigger(&self) -> &RenderTrigger {
		&self.trigger
	}

	/// Returns `true` if both handles share the same backing store.
	pub fn ptr_eq(this: &Self, other: &Self) -> bool {
		Rc::ptr_eq(&this.values, &other.values)
	}
}

impl fmt::Debug for ProxyState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProxyState")
			.field("values", &self.values.borrow())
			.finish()
	}
}
