//! Non-owning storage - the instance aliases caller memory

use super::Storage;
use crate::descriptor::{Interface, TableFor};
use crate::erased::{Erased, ErasedMut};
use crate::logging::log_storage_init;
use core::marker::PhantomData;
use core::ptr::NonNull;

/// Borrowed view of a caller-owned value
///
/// Calls mutate the caller's value in place; dropping the instance releases
/// nothing. The borrow checker keeps the instance from outliving the value.
pub struct Borrowed<'a, V: Interface> {
    ptr: NonNull<()>,
    table: &'static V,
    _borrow: PhantomData<&'a mut ()>,
}

impl<'a, V: Interface> Borrowed<'a, V> {
    pub fn init<T>(value: &'a mut T) -> Self
    where
        V: TableFor<T>,
    {
        log_storage_init("borrowed", V::NAME, core::mem::size_of::<T>());
        Self {
            ptr: NonNull::from(value).cast(),
            table: V::table(),
            _borrow: PhantomData,
        }
    }
}

unsafe impl<'a, V: Interface> Storage<V> for Borrowed<'a, V> {
    const STRATEGY: &'static str = "borrowed";

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
