//! Hook slot primitive: use_hook
//!
//! `use_hook` is the memoization primitive every other hook builds on: it
//! runs an initializer exactly once per component instance and returns the
//! cached value on every later render.

use std::rc::Rc;

use crate::runtime::with_runtime;

/// Runs `init` exactly once per component instance and returns the cached
/// result on every subsequent render.
///
/// Slots are positional: the Nth `use_hook` call of a render reads the Nth
/// slot. That makes the usual rules of hooks apply - call hooks
/// unconditionally and in the same order on every render.
///
/// # Type Parameters
///
/// * `T` - The cached value type
///
/// # Arguments
///
/// * `init` - Initializer, executed only on the component's first render
///
/// # Returns
///
/// An `Rc<T>` sharing the slot's value; the same allocation is returned on
/// every render of the same component instance.
///
/// # Panics
///
/// Panics when called outside a component render scope, or when the slot
/// at this position was filled with a different type on an earlier render
/// (hook order changed between renders).
///
/// # Example
///
/// ```ignore
/// use proxy_state::use_hook;
///
/// let expensive = use_hook(|| build_expensive_value());
/// ```
pub fn use_hook<T, F>(init: F) -> Rc<T>
where
	T: 'static,
	F: FnOnce() -> T,
{
	with_runtime(|rt| {
		let Some(id) = rt.current_component() else {
			panic!("use_hook called outside of a component render scope");
		};
		// The component is registered for as long as it is on the scope
		// stack, so the cursor is always available here.
		let Some(index) = rt.advance_hook_cursor(id) else {
			panic!("use_hook called for an unmounted component");
		};

		match rt.existing_hook(id, index) {
			Some(existing) => existing.downcast::<T>().unwrap_or_else(|_| {
				panic!(
					"hook slot {index} of component {id} changed type between renders; \
					 hooks must be called in the same order on every render"
				)
			}),
			None => {
				let slot = Rc::new(init());
				rt.store_hook(id, index, slot.clone());
				slot
			}
		}
	})
}
