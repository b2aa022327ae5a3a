//! Render notification trigger.
//!
//! A [`RenderTrigger`] is the single notification point between a state
//! container and whatever owns it. Invoking the trigger schedules the owner
//! for re-evaluation; the trigger itself carries no payload and no return
//! value.
//!
//! Triggers have *stable identity*: a component's trigger is built once at
//! mount time and every clone shares it. Equality compares identity, not
//! behavior.

use std::fmt;
use std::rc::Rc;

/// A stable, cheaply cloneable re-render notification callback.
///
/// `RenderTrigger` wraps a function in an `Rc`, so cloning it produces a new
/// handle to the *same* callback. It is safe to invoke zero, one, or many
/// times per synchronous turn; each invocation runs the callback exactly
/// once, with no deduplication at this layer.
///
/// ## Example
///
/// ```ignore
/// use proxy_state::RenderTrigger;
///
/// let trigger = RenderTrigger::new(|| {
///     log!("schedule a re-render");
/// });
///
/// trigger.notify();
/// trigger.notify(); // runs the callback again, no batching
/// ```
#[derive(Clone)]
pub struct RenderTrigger {
	inner: Rc<dyn Fn()>,
}

impl RenderTrigger {
	/// Creates a trigger from a function or closure.
	///
	/// # Arguments
	///
	/// * `f` - The callback to run on every [`notify`](Self::notify)
	pub fn new<F>(f: F) -> Self
	where
		F: Fn() + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Creates a trigger that does nothing when invoked.
	///
	/// Useful for detached state containers (no owning component) and for
	/// tests that only exercise the store.
	pub fn noop() -> Self {
		Self::new(|| {})
	}

	/// Invokes the callback.
	pub fn notify(&self) {
		(self.inner)();
	}

	/// Returns `true` if both handles refer to the same underlying callback.
	pub fn ptr_eq(this: &Self, other: &Self) -> bool {
		Rc::ptr_eq(&this.inner, &other.inner)
	}
}

impl PartialEq for RenderTrigger {
	fn eq(&self, other: &Self) -> bool {
		Self::ptr_eq(self, other)
	}
}

impl fmt::Debug for RenderTrigger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderTrigger")
			.field("callback", &Rc::as_ptr(&self.inner))
			.finish()
	}
}
