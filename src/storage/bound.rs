//! Compile-time storage - the instance is the value
//!
//! `Bound<T>` stores no table pointer. Its `table()` returns the promoted
//! constant for `T`, so after inlining each call is a direct call into `T`.

use super::Storage;
use crate::descriptor::TableFor;
use crate::erased::{Erased, ErasedMut};

/// A value whose interface calls are resolved statically
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bound<T>(T);

impl<T> Bound<T> {
    #[inline]
    pub const fn init(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.0
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

unsafe impl<T, V: TableFor<T>> Storage<V> for Bound<T> {
    const STRATEGY: &'static str = "bound";

    #[inline(always)]
    fn table(&self) -> &'static V {
        V::table()
    }

    #[inline(always)]
    fn erased(&self) -> Erased<'_> {
        Erased::new(&self.0)
    }

    #[inline(always)]
    fn erased_mut(&mut self) -> ErasedMut<'_> {
        ErasedMut::new(&mut self.0)
    }
}
