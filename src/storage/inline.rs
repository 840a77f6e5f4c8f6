//! Inline storage - the value lives in a fixed buffer inside the instance
//!
//! Capacity is checked while monomorphizing `Inline::init`: a value that does
//! not fit stops the build, so no undersized instance can ever exist.

use super::{drop_erased, DropFn, Storage};
use crate::descriptor::{Interface, TableFor};
use crate::erased::{Erased, ErasedMut};
use crate::logging::{log_storage_init, log_storage_release};
use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::mem::{align_of, size_of, MaybeUninit};
use core::ptr::NonNull;

/// Strongest alignment an inline buffer guarantees
pub const INLINE_ALIGN: usize = 16;

#[repr(C, align(16))]
struct Buffer<const N: usize>(UnsafeCell<[MaybeUninit<u8>; N]>);

/// Compile-time capacity check for `T` in an `N`-byte buffer
struct Fits<T, const N: usize>(PhantomData<T>);

impl<T, const N: usize> Fits<T, N> {
    const OK: () = {
        assert!(size_of::<T>() <= N, "value does not fit the inline buffer");
        assert!(align_of::<T>() <= INLINE_ALIGN, "value is over-aligned for the inline buffer");
    };
}

/// `N` bytes of embedded storage holding one moved-in value
pub struct Inline<V: Interface, const N: usize> {
    buf: Buffer<N>,
    size: usize,
    drop: DropFn,
    table: &'static V,
    // Erased contents may be neither Send nor Sync
    _not_send: PhantomData<*mut ()>,
}

impl<V: Interface, const N: usize> Inline<V, N> {
    /// Move `value` into the buffer; `T` may not borrow
    pub fn init<T: 'static>(value: T) -> Self
    where
        V: TableFor<T>,
    {
        #[allow(clippy::let_unit_value)]
        let () = Fits::<T, N>::OK;

        let mut buf = Buffer(UnsafeCell::new([MaybeUninit::uninit(); N]));
        unsafe { buf.0.get_mut().as_mut_ptr().cast::<T>().write(value) };
        log_storage_init("inline", V::NAME, size_of::<T>());

        Self {
            buf,
            size: size_of::<T>(),
            drop: drop_erased::<T>,
            table: V::table(),
            _not_send: PhantomData,
        }
    }

    /// Buffer capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes used by the stored value
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    // Shared calls may write through the value's interior mutability
    #[inline]
    fn ptr(&self) -> NonNull<()> {
        unsafe { NonNull::new_unchecked(self.buf.0.get().cast()) }
    }

    #[inline]
    fn ptr_mut(&mut self) -> NonNull<()> {
        NonNull::from(self.buf.0.get_mut()).cast()
    }
}

unsafe impl<V: Interface, const N: usize> Storage<V> for Inline<V, N> {
    const STRATEGY: &'static str = "inline";

    #[inline]
    fn table(&self) -> &'static V {
        self.table
    }

    #[inline]
    fn erased(&self) -> Erased<'_> {
        unsafe { Erased::from_raw(self.ptr()) }
    }

    #[inline]
    fn erased_mut(&mut self) -> ErasedMut<'_> {
        unsafe { ErasedMut::from_raw(self.ptr_mut()) }
    }
}

impl<V: Interface, const N: usize> Drop for Inline<V, N> {
    fn drop(&mut self) {
        let ptr = self.ptr_mut();
        unsafe { (self.drop)(ptr.as_ptr()) };
        log_storage_release("inline", V::NAME, self.size);
    }
}
