//! Type-erased self pointers handed to dispatch slots
//!
//! Both wrappers are a single non-null pointer plus a lifetime. They keep the
//! provenance of the original value (no zero-sized reference in between), so
//! casting back to the concrete type is sound as long as the type matches.

use core::marker::PhantomData;
use core::ptr::NonNull;

/// Erased `&'a T`
#[derive(Clone, Copy)]
pub struct Erased<'a> {
    ptr: NonNull<()>,
    _marker: PhantomData<&'a ()>,
}

impl<'a> Erased<'a> {
    #[inline]
    pub fn new<T>(value: &'a T) -> Self {
        Self { ptr: NonNull::from(value).cast(), _marker: PhantomData }
    }

    /// # Safety
    /// `ptr` must point to a live, initialized value that stays valid and
    /// unaliased by writers for `'a`.
    #[inline]
    pub unsafe fn from_raw(ptr: NonNull<()>) -> Self {
        Self { ptr, _marker: PhantomData }
    }

    /// Recover the concrete reference
    ///
    /// # Safety
    /// `T` must be the exact type the pointer was erased from.
    #[inline]
    pub unsafe fn cast<T>(self) -> &'a T {
        &*self.ptr.as_ptr().cast::<T>()
    }

    #[inline]
    pub fn as_ptr(self) -> *const () {
        self.ptr.as_ptr()
    }
}

/// Erased `&'a mut T`
pub struct ErasedMut<'a> {
    ptr: NonNull<()>,
    _marker: PhantomData<&'a mut ()>,
}

impl<'a> ErasedMut<'a> {
    #[inline]
    pub fn new<T>(value: &'a mut T) -> Self {
        Self { ptr: NonNull::from(value).cast(), _marker: PhantomData }
    }

    /// # Safety
    /// `ptr` must point to a live, initialized value with no other access
    /// for `'a`.
    #[inline]
    pub unsafe fn from_raw(ptr: NonNull<()>) -> Self {
        Self { ptr, _marker: PhantomData }
    }

    /// Recover the concrete mutable reference
    ///
    /// # Safety
    /// `T` must be the exact type the pointer was erased from.
    #[inline]
    pub unsafe fn cast<T>(self) -> &'a mut T {
        &mut *self.ptr.as_ptr().cast::<T>()
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut () {
        self.ptr.as_ptr()
    }
}
