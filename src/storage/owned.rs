//! Owning storage - the value is moved into a block from a `RawAlloc`

use super::{drop_erased, DropFn, Storage};
use crate::allocator::{Global, RawAlloc};
use crate::descriptor::{Interface, TableFor};
use crate::erased::{Erased, ErasedMut};
use crate::errors::AllocError;
use crate::logging::{log_alloc_failure, log_storage_init, log_storage_release};
use core::alloc::Layout;
use core::ptr::NonNull;

/// Heap copy of a value plus the allocator that owns its block
///
/// Dropping runs the value's destructor first, then returns the block to the
/// stored allocator. Zero-sized values never touch the allocator.
pub struct Owned<V: Interface, A: RawAlloc = Global> {
    ptr: NonNull<()>,
    layout: Layout,
    drop: DropFn,
    table: &'static V,
    alloc: A,
}

impl<V: Interface> Owned<V, Global> {
    pub fn init<T: 'static>(value: T) -> Result<Self, AllocError>
    where
        V: TableFor<T>,
    {
        Self::init_in(value, Global)
    }
}

impl<V: Interface, A: RawAlloc> Owned<V, A> {
    /// Move `value` into a block from `alloc`
    ///
    /// On failure the value is dropped here and no instance exists. The
    /// instance carries no lifetime, so `T` may not borrow.
    pub fn init_in<T: 'static>(value: T, alloc: A) -> Result<Self, AllocError>
    where
        V: TableFor<T>,
    {
        let layout = Layout::new::<T>();

        let ptr: NonNull<()> = if layout.size() == 0 {
            NonNull::<T>::dangling().cast()
        } else {
            match alloc.allocate(layout) {
                Some(block) => block.cast(),
                None => {
                    log_alloc_failure(V::NAME, layout.size(), layout.align());
                    return Err(AllocError::for_layout(layout));
                }
            }
        };

        unsafe { ptr.as_ptr().cast::<T>().write(value) };
        log_storage_init("owned", V::NAME, layout.size());

        Ok(Self {
            ptr,
            layout,
            drop: drop_erased::<T>,
            table: V::table(),
            alloc,
        })
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

unsafe impl<V: Interface, A: RawAlloc> Storage<V> for Owned<V, A> {
    const STRATEGY: &'static str = "owned";

    #[inline]
    fn table(&self) -> &'static V {
        self.table
    }

    #[inline]
    fn erased(&self) -> Erased<'_> {
        unsafe { Erased::from_raw(self.ptr) }
    }

    #[inline]
    fn erased_mut(&mut self) -> ErasedMut<'_> {
        unsafe { ErasedMut::from_raw(self.ptr) }
    }
}

impl<V: Interface, A: RawAlloc> Drop for Owned<V, A> {
    fn drop(&mut self) {
        unsafe {
            (self.drop)(self.ptr.as_ptr());
            if self.layout.size() != 0 {
                self.alloc.deallocate(self.ptr.cast(), self.layout);
            }
        }
        log_storage_release("owned", V::NAME, self.layout.size());
    }
}
