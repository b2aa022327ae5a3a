//! Trigger hook: use_render_trigger
//!
//! Access to the owning component's stable notification trigger.

use crate::runtime::with_runtime;
use crate::trigger::RenderTrigger;

/// Returns the rendering component's stable [`RenderTrigger`].
///
/// The trigger is built once at mount time; every call during any render of
/// the same component returns a handle to that same callback, so identity
/// is stable across the component's whole lifetime. Invoking it schedules
/// the component for re-render and is safe to do zero, one, or many times
/// per synchronous turn.
///
/// This takes no hook slot, so it does not participate in hook ordering.
///
/// # Panics
///
/// Panics when called outside a component render scope.
///
/// # Example
///
/// ```ignore
/// use proxy_state::use_render_trigger;
///
/// let force_update = use_render_trigger();
/// // later, from an event handler:
/// force_update.notify();
/// ```
pub fn use_render_trigger() -> RenderTrigger {
	with_runtime(|rt| {
		let Some(id) = rt.current_component() else {
			panic!("use_render_trigger called outside of a component render scope");
		};
		rt.component_trigger(id)
			.unwrap_or_else(|| panic!("component {id} is rendering but not registered"))
	})
}
