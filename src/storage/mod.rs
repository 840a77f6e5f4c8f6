//! Storage strategies - where a wrapped value lives and who releases it
//!
//! | Strategy   | Allocation        | Release                         | Dispatch      |
//! |------------|-------------------|---------------------------------|---------------|
//! | `Borrowed` | none              | caller                          | runtime table |
//! | `Owned`    | `RawAlloc`        | drop value, free via allocator  | runtime table |
//! | `Inline`   | embedded buffer   | drop value                      | runtime table |
//! | `Bound`    | none (the value)  | plain drop                      | static        |
//!
//! A strategy only has to hand the generated call methods three things: the
//! dispatch table and a shared or exclusive erased pointer to the value.

mod borrowed;
mod bound;
mod inline;
mod owned;


pub use borrowed::Borrowed;
pub use bound::Bound;
pub use inline::{Inline, INLINE_ALIGN};
pub use owned::Owned;

use crate::descriptor::Interface;
use crate::erased::{Erased, ErasedMut};

/// Storage backing an interface instance with table `V`
///
/// # Safety
/// `erased` and `erased_mut` must point to a live value of the exact type
/// `table()` was built for, for as long as the returned borrow lasts.
/// Everything that value borrows must also outlive any borrow of the
/// storage: suspended calls keep the value borrowed across resumes.
pub unsafe trait Storage<V: Interface> {
    /// Strategy name, for diagnostics
    const STRATEGY: &'static str;

    fn table(&self) -> &'static V;

    fn erased(&self) -> Erased<'_>;

    fn erased_mut(&mut self) -> ErasedMut<'_>;
}

/// Type-erased destructor stored next to owned bytes
pub(crate) type DropFn = unsafe fn(*mut ());

/// # Safety
/// `ptr` must point to an initialized `T` that is not used afterwards.
pub(crate) unsafe fn drop_erased<T>(ptr: *mut ()) {
    core::ptr::drop_in_place(ptr.cast::<T>());
}
