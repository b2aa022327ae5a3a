//! Component mount/unmount and render scheduling.
//!
//! This is the host-side plumbing around the state container: a component
//! is a render closure registered under a [`ComponentId`], re-executed
//! whenever its [`RenderTrigger`](crate::trigger::RenderTrigger) schedules
//! it and [`flush_renders`] drains the queue.
//!
//! ## Lifecycle
//!
//! ```text
//! mount(render) ──▶ first render (hooks fill their slots)
//!       │
//!       │  state.set(..) ──▶ trigger ──▶ render queue
//!       │                                     │
//!       │                flush_renders() ◀────┘  (re-render, hooks replay)
//!       ▼
//! drop(MountHandle) ──▶ unmount (hook slots and state torn down)
//! ```
//!
//! Hook slots are filled on the first render and replayed positionally on
//! every later render, so per-component values (state containers included)
//! are constructed exactly once per component lifetime.

use core::cell::RefCell;
use std::collections::BTreeMap;

use crate::runtime::{ComponentId, try_with_runtime, with_runtime};
use crate::trigger::RenderTrigger;

/// Type alias for component render closures.
type RenderFn = Box<dyn FnMut()>;

// Global storage for render closures.
//
// Kept outside the runtime so the runtime itself stays borrowable while a
// render executes.
thread_local! {
	static RENDER_FUNCTIONS: RefCell<BTreeMap<ComponentId, RenderFn>> =
		const { RefCell::new(BTreeMap::new()) };
}

/// Upper bound on consecutive flush passes before giving up.
///
/// A render that schedules itself unconditionally would otherwise spin
/// forever inside [`flush_renders`].
const MAX_RENDER_PASSES: usize = 100;

/// Owning handle for a mounted component.
///
/// Dropping the handle unmounts the component: its render closure, hook
/// slots, and any state constructed by those hooks are torn down, and
/// pending re-renders for it are discarded. The transition is one-way.
pub struct MountHandle {
	id: ComponentId,
}

impl MountHandle {
	/// The component's id.
	pub fn id(&self) -> ComponentId {
		self.id
	}

	/// Number of times the render closure has executed so far.
	pub fn render_count(&self) -> u64 {
		with_runtime(|rt| rt.render_count(self.id)).unwrap_or(0)
	}

	/// Unmounts the component.
	///
	/// Idempotent; also invoked on drop.
	pub fn unmount(&self) {
		let _ = try_with_runtime(|rt| rt.remove_component(self.id));
		let _ = RENDER_FUNCTIONS.try_with(|fns| {
			fns.borrow_mut().remove(&self.id);
		});
		tracing::trace!(component = %self.id, "component unmounted");
	}
}

impl Drop for MountHandle {
	fn drop(&mut self) {
		self.unmount();
	}
}

/// Mounts a component and runs its render closure once.
///
/// Mounting allocates a [`ComponentId`], builds the component's stable
/// [`RenderTrigger`](crate::trigger::RenderTrigger) (each invocation pushes
/// one entry on the render queue), and executes `render` inside the
/// component's scope so hooks can fill their slots.
///
/// # Arguments
///
/// * `render` - The render closure. Must call its hooks in the same order
///   on every execution.
///
/// # Example
///
/// ```ignore
/// use proxy_state::{flush_renders, mount, use_proxy_state};
/// use serde_json::json;
///
/// let handle = mount(|| {
///     let state = use_proxy_state(json!({"count": 0}).as_object().unwrap());
///     // read state, wire event handlers that call state.set(..)
/// });
///
/// flush_renders();
/// drop(handle); // unmount
/// ```
pub fn mount<F>(render: F) -> MountHandle
where
	F: FnMut() + 'static,
{
	let id = ComponentId::next();

	// The stable trigger: invoking it schedules this component. Built once
	// here and reused for every mutation over the component's lifetime.
	let trigger = RenderTrigger::new(move || {
		let _ = try_with_runtime(|rt| rt.schedule_render(id));
	});

	with_runtime(|rt| rt.register_component(id, trigger));
	RENDER_FUNCTIONS.with(|fns| {
		fns.borrow_mut().insert(id, Box::new(render));
	});
	tracing::trace!(component = %id, "component mounted");

	execute_render(id);

	MountHandle { id }
}

/// Executes a component's render closure inside its scope.
pub(crate) fn execute_render(id: ComponentId) {
	with_runtime(|rt| rt.push_scope(id));

	RENDER_FUNCTIONS.with(|fns| {
		if let Some(render) = fns.borrow_mut().get_mut(&id) {
			render();
		}
	});

	with_runtime(|rt| rt.pop_scope());
}

/// Drains the render queue, re-executing every scheduled component.
///
/// Requests are coalesced per component within one pass: however many times
/// a component was notified since the last flush, it re-renders once per
/// pass. Renders scheduled *during* a pass are handled by the next pass,
/// up to a cascade cap; hitting the cap logs a warning and stops, on the
/// assumption that a render closure is scheduling itself unconditionally.
pub fn flush_renders() {
	for _ in 0..MAX_RENDER_PASSES {
		let queue = with_runtime(|rt| rt.take_render_queue());
		if queue.is_empty() {
			return;
		}

		let mut scheduled: Vec<ComponentId> = Vec::new();
		for id in queue {
			if !scheduled.contains(&id) {
				scheduled.push(id);
			}
		}

		for id in scheduled {
			// The component may have been unmounted after scheduling.
			if with_runtime(|rt| rt.is_mounted(id)) {
				execute_render(id);
			}
		}
	}

	tracing::warn!(
		"flush_renders stopped after {MAX_RENDER_PASSES} passes; a render closure appears to reschedule itself unconditionally"
	);
}

/// Number of queued render requests on this thread, duplicates included.
///
/// Each trigger invocation contributes one entry until the next
/// [`flush_renders`], so this observably counts notifications.
pub fn pending_render_requests() -> usize {
	with_runtime(|rt| rt.pending_render_requests())
}
