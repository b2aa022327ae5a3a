//! Thread-local host runtime.
//!
//! The runtime supplies the two capabilities the state container consumes
//! from its host: a per-component "run this initializer exactly once" hook
//! slot cache, and a stable per-component re-render trigger backed by a
//! render queue.
//!
//! One runtime exists per thread (`thread_local!`). All bookkeeping is
//! single-threaded and synchronous: scheduling a render pushes an entry on
//! the queue and returns; nothing executes until
//! [`flush_renders`](crate::component::flush_renders) drains it.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::thread::AccessError;

use crate::trigger::RenderTrigger;

/// Unique identifier for a mounted component.
///
/// Allocated monotonically from a thread-local counter; never reused within
/// a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

thread_local! {
	static NEXT_COMPONENT_ID: Cell<u64> = const { Cell::new(1) };
}

impl ComponentId {
	/// Allocates a fresh id.
	pub(crate) fn next() -> Self {
		NEXT_COMPONENT_ID.with(|next| {
			let id = next.get();
			next.set(id + 1);
			Self(id)
		})
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Per-component bookkeeping.
pub(crate) struct ComponentState {
	/// Positional hook slots. Filled on first render, read thereafter.
	hooks: Vec<Rc<dyn Any>>,
	/// Index of the next hook slot the current render will touch.
	cursor: usize,
	/// The component's stable notification trigger, built once at mount.
	trigger: RenderTrigger,
	/// Number of times the component's render closure has executed.
	renders: u64,
}

/// The thread-local host runtime.
///
/// Tracks mounted components, the component currently rendering (a stack,
/// so renders may nest), and the queue of scheduled re-renders.
pub struct Runtime {
	components: RefCell<BTreeMap<ComponentId, ComponentState>>,
	scope_stack: RefCell<Vec<ComponentId>>,
	/// Scheduled re-renders, one entry per trigger invocation. Duplicates
	/// are kept here and coalesced at flush time, so the queue length
	/// observably counts notifications.
	render_queue: RefCell<Vec<ComponentId>>,
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Runs `f` with this thread's runtime.
pub fn with_runtime<R>(f: impl FnOnce(&Runtime) -> R) -> R {
	RUNTIME.with(f)
}

/// Runs `f` with this thread's runtime, failing instead of panicking if the
/// thread-local storage has already been destroyed.
///
/// Use this from `Drop` implementations, which may run during thread
/// teardown.
pub fn try_with_runtime<R>(f: impl FnOnce(&Runtime) -> R) -> Result<R, AccessError> {
	RUNTIME.try_with(f)
}

impl Runtime {
	fn new() -> Self {
		Self {
			components: RefCell::new(BTreeMap::new()),
			scope_stack: RefCell::new(Vec::new()),
			render_queue: RefCell::new(Vec::new()),
		}
	}

	/// Registers a freshly mounted component.
	pub(crate) fn register_component(&self, id: ComponentId, trigger: RenderTrigger) {
		self.components.borrow_mut().insert(
			id,
			ComponentState {
				hooks: Vec::new(),
				cursor: 0,
				trigger,
				renders: 0,
			},
		);
	}

	/// Removes a component and drops all of its hook slots.
	///
	/// Dropping the slots tears down every per-component value, including
	/// any state container's backing store.
	pub(crate) fn remove_component(&self, id: ComponentId) {
		self.components.borrow_mut().remove(&id);
		self.render_queue.borrow_mut().retain(|queued| *queued != id);
	}

	/// Returns `true` if the component is still registered.
	pub fn is_mounted(&self, id: ComponentId) -> bool {
		self.components.borrow().contains_key(&id)
	}

	/// Enters a component's render scope, resetting its hook cursor.
	pub(crate) fn push_scope(&self, id: ComponentId) {
		if let Some(state) = self.components.borrow_mut().get_mut(&id) {
			state.cursor = 0;
			state.renders += 1;
		}
		self.scope_stack.borrow_mut().push(id);
	}

	/// Leaves the innermost render scope.
	pub(crate) fn pop_scope(&self) {
		self.scope_stack.borrow_mut().pop();
	}

	/// The component currently rendering, if any.
	pub fn current_component(&self) -> Option<ComponentId> {
		self.scope_stack.borrow().last().copied()
	}

	/// Schedules a re-render of `id`.
	///
	/// Every call pushes one queue entry - coalescing happens at flush
	/// time, not here, so N notifications are observable as N entries.
	pub fn schedule_render(&self, id: ComponentId) {
		tracing::trace!(component = %id, "render scheduled");
		self.render_queue.borrow_mut().push(id);
	}

	/// Number of queued render requests, duplicates included.
	pub fn pending_render_requests(&self) -> usize {
		self.render_queue.borrow().len()
	}

	/// Drains the render queue.
	pub(crate) fn take_render_queue(&self) -> Vec<ComponentId> {
		self.render_queue.borrow_mut().drain(..).collect()
	}

	/// The stable trigger registered for `id` at mount time.
	pub(crate) fn component_trigger(&self, id: ComponentId) -> Option<RenderTrigger> {
		self.components
			.borrow()
			.get(&id)
			.map(|state| state.trigger.clone())
	}

	/// Number of times `id`'s render closure has executed.
	pub fn render_count(&self, id: ComponentId) -> Option<u64> {
		self.components.borrow().get(&id).map(|state| state.renders)
	}

	/// Claims the next hook slot index for the current render of `id`.
	pub(crate) fn advance_hook_cursor(&self, id: ComponentId) -> Option<usize> {
		let mut components = self.components.borrow_mut();
		let state = components.get_mut(&id)?;
		let index = state.cursor;
		state.cursor += 1;
		Some(index)
	}

	/// The slot stored at `index` during an earlier render, if any.
	pub(crate) fn existing_hook(&self, id: ComponentId, index: usize) -> Option<Rc<dyn Any>> {
		self.components
			.borrow()
			.get(&id)
			.and_then(|state| state.hooks.get(index).cloned())
	}

	/// Stores a hook slot. `index` must be the slot just claimed via
	/// [`advance_hook_cursor`](Self::advance_hook_cursor).
	pub(crate) fn store_hook(&self, id: ComponentId, index: usize, slot: Rc<dyn Any>) {
		let mut components = self.components.borrow_mut();
		if let Some(state) = components.get_mut(&id) {
			debug_assert_eq!(state.hooks.len(), index, "hook slots must fill in order");
			state.hooks.push(slot);
		}
	}
}
