//! The `interface!` macro and its expansion helpers
//!
//! Expansion runs in two phases. `@parse` walks the entries and normalizes
//! each one to `(kind mode receiver [attrs] name [args] ret)`; `@emit` then
//! writes the conformance trait, the dispatch table, the per-type table
//! constant and the wrapper with one call method per entry. The helper
//! macros below are keyed on the normalized words:
//!
//! - kind: `req` | `opt`
//! - mode: `sync` | `suspend`
//! - receiver: `exclusive` (`&mut self`) | `shared` (`&self`) | `free`

/// Declare an interface: conformance trait, dispatch table and wrapper
///
/// ```
/// use polyface::{interface, Inline};
///
/// interface! {
///     /// Something that accumulates numbers
///     pub interface Accumulator {
///         conformance AccumulatorImpl;
///         table AccumulatorTable;
///
///         fn add(&mut self, amount: u32);
///         fn total(&self) -> u32;
///         fn unit() -> &'static str;
///         optional fn reset(&mut self);
///     }
/// }
///
/// struct Counter(u32);
///
/// impl AccumulatorImpl for Counter {
///     fn add(&mut self, amount: u32) {
///         self.0 += amount;
///     }
///     fn total(&self) -> u32 {
///         self.0
///     }
///     fn unit() -> &'static str {
///         "items"
///     }
/// }
///
/// let mut acc = Accumulator::owned(Counter(1)).expect("heap");
/// acc.add(2);
/// assert_eq!(acc.total(), 3);
/// assert_eq!(acc.unit(), "items");
/// assert_eq!(acc.reset(), None);
/// acc.deinit();
///
/// let mut fixed: Accumulator<Inline<AccumulatorTable, 8>> = Accumulator::inline(Counter(5));
/// fixed.add(1);
/// assert_eq!(fixed.total(), 6);
///
/// let mut direct = Accumulator::bound(Counter(0));
/// direct.add(9);
/// assert_eq!(direct.into_inner().0, 9);
/// ```
///
/// Entries share a namespace with the wrapper's own methods, so `borrowed`,
/// `owned`, `owned_in`, `inline`, `bound`, `into_inner`, `from_storage`,
/// `storage`, `deinit` and `provides` are not valid entry names. Arguments of
/// `async` entries must be owned or `'static`.
///
/// Table slots take the receiver as an erased pointer, so a returned reference
/// cannot borrow from `self` through elision. An entry that takes further
/// reference arguments and returns an elided reference has no lifetime to
/// elide to; spell out `'static` or return an owned value:
///
/// ```compile_fail,E0106
/// use polyface::interface;
///
/// interface! {
///     pub interface Lookup {
///         conformance LookupImpl;
///         table LookupTable;
///
///         fn get(&self, key: &str) -> &str;
///     }
/// }
/// ```
///
/// A conforming type may borrow; only the owning and inline strategies need
/// it to be `'static`:
///
/// ```
/// use polyface::interface;
///
/// interface! {
///     pub interface Fill {
///         conformance FillImpl;
///         table FillTable;
///
///         fn put(&mut self, byte: u8) -> bool;
///     }
/// }
///
/// struct Cursor<'a> {
///     out: &'a mut [u8],
///     pos: usize,
/// }
///
/// impl FillImpl for Cursor<'_> {
///     fn put(&mut self, byte: u8) -> bool {
///         let Some(slot) = self.out.get_mut(self.pos) else {
///             return false;
///         };
///         *slot = byte;
///         self.pos += 1;
///         true
///     }
/// }
///
/// let mut buf = [0u8; 2];
/// let mut cursor = Cursor { out: &mut buf, pos: 0 };
/// let mut fill = Fill::borrowed(&mut cursor);
/// assert!(fill.put(7));
/// assert!(fill.put(8));
/// assert!(!fill.put(9));
/// drop(fill);
/// assert_eq!(buf, [7, 8]);
/// ```
///
/// A conforming type must implement every required entry:
///
/// ```compile_fail,E0046
/// use polyface::interface;
///
/// interface! {
///     pub interface Sink {
///         conformance SinkImpl;
///         table SinkTable;
///
///         fn push(&mut self, byte: u8);
///         optional fn flush(&mut self);
///     }
/// }
///
/// struct Nothing;
///
/// impl SinkImpl for Nothing {}
/// ```
///
/// A value larger than the inline buffer is rejected while building:
///
/// ```compile_fail
/// use polyface::{interface, Inline};
///
/// interface! {
///     pub interface Sink {
///         conformance SinkImpl;
///         table SinkTable;
///
///         fn push(&mut self, byte: u8);
///     }
/// }
///
/// struct Big([u8; 64]);
///
/// impl SinkImpl for Big {
///     fn push(&mut self, byte: u8) {
///         self.0[0] = byte;
///     }
/// }
///
/// let sink: Sink<Inline<SinkTable, 16>> = Sink::inline(Big([0; 64]));
/// ```
///
/// Undeclared names do not exist on the wrapper:
///
/// ```compile_fail,E0599
/// use polyface::interface;
///
/// interface! {
///     pub interface Sink {
///         conformance SinkImpl;
///         table SinkTable;
///
///         fn push(&mut self, byte: u8);
///     }
/// }
///
/// struct Bytes(Vec<u8>);
///
/// impl SinkImpl for Bytes {
///     fn push(&mut self, byte: u8) {
///         self.0.push(byte);
///     }
/// }
///
/// let mut sink = Sink::bound(Bytes(Vec::new()));
/// sink.pop();
/// ```
#[macro_export]
macro_rules! interface {
    (
        $(#[$attr:meta])*
        $vis:vis interface $name:ident {
            conformance $imp:ident;
            table $table:ident;
            $($body:tt)*
        }
    ) => {
        $crate::interface!(@parse
            { [$(#[$attr])*] [$vis] $name $imp $table }
            []
            $($body)*
        );
    };

    // ----- @parse: one rule per entry prefix -----

    (@parse $hdr:tt [$($done:tt)*]
        $(#[$m:meta])* optional async fn $method:ident $params:tt $(-> $ret:ty)?;
        $($rest:tt)*
    ) => {
        $crate::interface!(@receiver $hdr [$($done)*] opt suspend [$(#[$m])*] $method $params [$($ret)?] $($rest)*);
    };
    (@parse $hdr:tt [$($done:tt)*]
        $(#[$m:meta])* optional fn $method:ident $params:tt $(-> $ret:ty)?;
        $($rest:tt)*
    ) => {
        $crate::interface!(@receiver $hdr [$($done)*] opt sync [$(#[$m])*] $method $params [$($ret)?] $($rest)*);
    };
    (@parse $hdr:tt [$($done:tt)*]
        $(#[$m:meta])* async fn $method:ident $params:tt $(-> $ret:ty)?;
        $($rest:tt)*
    ) => {
        $crate::interface!(@receiver $hdr [$($done)*] req suspend [$(#[$m])*] $method $params [$($ret)?] $($rest)*);
    };
    (@parse $hdr:tt [$($done:tt)*]
        $(#[$m:meta])* fn $method:ident $params:tt $(-> $ret:ty)?;
        $($rest:tt)*
    ) => {
        $crate::interface!(@receiver $hdr [$($done)*] req sync [$(#[$m])*] $method $params [$($ret)?] $($rest)*);
    };
    (@parse { [$($attr:tt)*] [$($vis:tt)*] $name:ident $imp:ident $table:ident } [$($done:tt)*]) => {
        $crate::interface!(@emit [$($attr)*] [$($vis)*] $name $imp $table $($done)*);
    };

    // ----- @receiver: self convention -----

    (@receiver $hdr:tt $done:tt $kind:ident $mode:ident $attrs:tt $method:ident
        (&mut self $(, $arg:ident : $ty:ty)* $(,)?) $ret:tt $($rest:tt)*
    ) => {
        $crate::interface!(@ret $hdr $done $kind $mode exclusive $attrs $method [$($arg : $ty),*] $ret $($rest)*);
    };
    (@receiver $hdr:tt $done:tt $kind:ident $mode:ident $attrs:tt $method:ident
        (&self $(, $arg:ident : $ty:ty)* $(,)?) $ret:tt $($rest:tt)*
    ) => {
        $crate::interface!(@ret $hdr $done $kind $mode shared $attrs $method [$($arg : $ty),*] $ret $($rest)*);
    };
    (@receiver $hdr:tt $done:tt $kind:ident $mode:ident $attrs:tt $method:ident
        ($($arg:ident : $ty:ty),* $(,)?) $ret:tt $($rest:tt)*
    ) => {
        $crate::interface!(@ret $hdr $done $kind $mode free $attrs $method [$($arg : $ty),*] $ret $($rest)*);
    };

    // ----- @ret: default return type -----

    (@ret $hdr:tt [$($done:tt)*] $kind:ident $mode:ident $recv:ident $attrs:tt $method:ident $args:tt
        [] $($rest:tt)*
    ) => {
        $crate::interface!(@parse $hdr [$($done)* ($kind $mode $recv $attrs $method $args ())] $($rest)*);
    };
    (@ret $hdr:tt [$($done:tt)*] $kind:ident $mode:ident $recv:ident $attrs:tt $method:ident $args:tt
        [$ret:ty] $($rest:tt)*
    ) => {
        $crate::interface!(@parse $hdr [$($done)* ($kind $mode $recv $attrs $method $args $ret)] $($rest)*);
    };

    // ----- @emit -----

    (@emit [$($attr:tt)*] [$($vis:tt)*] $name:ident $imp:ident $table:ident
        $( ($kind:ident $mode:ident $recv:ident [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) )*
    ) => {
        $($attr)*
        $($vis)* struct $name<S> {
            storage: S,
        }

        #[doc = concat!("Conformance trait for [`", stringify!($name), "`].")]
        #[allow(async_fn_in_trait)]
        $($vis)* trait $imp: Sized {
            $(
                $crate::__iface_conform! { $kind $mode $recv [$($m)*] $method [$($arg : $ty),*] $ret }
            )*
        }

        #[doc = concat!("Dispatch table and descriptor of [`", stringify!($name), "`].")]
        #[allow(non_snake_case)]
        $($vis)* struct $table {
            $(
                $method: $crate::__iface_slot!($kind $mode $recv [$($ty),*] $ret),
            )*
        }

        impl $crate::Interface for $table {
            const NAME: &'static str = stringify!($name);

            const METHODS: &'static [$crate::MethodEntry] = &[
                $(
                    $crate::MethodEntry {
                        name: stringify!($method),
                        receiver: $crate::__iface_meta!(receiver $recv),
                        optional: $crate::__iface_meta!(optional $kind),
                        suspends: $crate::__iface_meta!(suspends $mode),
                    },
                )*
            ];

            fn provides(&self, name: &str) -> ::core::option::Option<bool> {
                match name {
                    $(
                        stringify!($method) => ::core::option::Option::Some(
                            $crate::__iface_meta!(present $kind self.$method)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        const _: () = ::core::assert!(
            $crate::descriptor::names_unique(<$table as $crate::Interface>::METHODS),
            "interface entries must have unique names"
        );

        impl<T: $imp> $crate::TableFor<T> for $table {
            const TABLE: Self = Self {
                $(
                    $method: $crate::__iface_bind!($imp T; $kind $mode $recv $method [$($arg : $ty),*] $ret),
                )*
            };

            #[inline(always)]
            fn table() -> &'static Self {
                &<Self as $crate::TableFor<T>>::TABLE
            }
        }

        #[allow(dead_code)]
        impl<S: $crate::Storage<$table>> $name<S> {
            /// Wrap an already constructed storage
            #[inline]
            pub fn from_storage(storage: S) -> Self {
                Self { storage }
            }

            #[inline]
            pub fn storage(&self) -> &S {
                &self.storage
            }

            /// Release the instance: runs the value's teardown for owning
            /// strategies, then frees their storage
            #[inline]
            pub fn deinit(self) {
                ::core::mem::drop(self);
            }

            /// Whether the wrapped type implements `name`
            #[inline]
            pub fn provides(&self, name: &str) -> ::core::option::Option<bool> {
                <$table as $crate::Interface>::provides(
                    <S as $crate::Storage<$table>>::table(&self.storage),
                    name,
                )
            }

            $(
                $crate::__iface_call! { $table; $kind $mode $recv [$($m)*] $method [$($arg : $ty),*] $ret }
            )*
        }

        #[allow(dead_code)]
        impl<'a> $name<$crate::Borrowed<'a, $table>> {
            /// Wrap a caller-owned value without taking ownership
            #[inline]
            pub fn borrowed<T: $imp>(value: &'a mut T) -> Self {
                Self { storage: $crate::Borrowed::init(value) }
            }
        }

        #[allow(dead_code)]
        impl $name<$crate::Owned<$table>> {
            /// Move `value` to the global heap
            #[inline]
            pub fn owned<T: $imp + 'static>(value: T) -> ::core::result::Result<Self, $crate::AllocError> {
                ::core::result::Result::Ok(Self { storage: $crate::Owned::init(value)? })
            }
        }

        #[allow(dead_code)]
        impl<A: $crate::RawAlloc> $name<$crate::Owned<$table, A>> {
            /// Move `value` into a block from `alloc`
            #[inline]
            pub fn owned_in<T: $imp + 'static>(value: T, alloc: A) -> ::core::result::Result<Self, $crate::AllocError> {
                ::core::result::Result::Ok(Self { storage: $crate::Owned::init_in(value, alloc)? })
            }
        }

        #[allow(dead_code)]
        impl<const N: usize> $name<$crate::Inline<$table, N>> {
            /// Move `value` into the instance's own `N`-byte buffer
            #[inline]
            pub fn inline<T: $imp + 'static>(value: T) -> Self {
                Self { storage: $crate::Inline::init(value) }
            }
        }

        #[allow(dead_code)]
        impl<T: $imp> $name<$crate::Bound<T>> {
            /// Bind `value` statically; calls resolve at compile time
            #[inline]
            pub fn bound(value: T) -> Self {
                Self { storage: $crate::Bound::init(value) }
            }

            #[inline]
            pub fn into_inner(self) -> T {
                self.storage.into_inner()
            }
        }
    };
}

/// Conformance trait item for one entry
#[doc(hidden)]
#[macro_export]
macro_rules! __iface_conform {
    (req sync exclusive [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)* fn $method(&mut self $(, $arg: $ty)*) -> $ret;
    };
    (req sync shared [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)* fn $method(&self $(, $arg: $ty)*) -> $ret;
    };
    (req sync free [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)* fn $method($($arg: $ty),*) -> $ret;
    };
    (req suspend exclusive [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)* async fn $method(&mut self $(, $arg: $ty)*) -> $ret;
    };
    (req suspend shared [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)* async fn $method(&self $(, $arg: $ty)*) -> $ret;
    };
    (req suspend free [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)* async fn $method($($arg: $ty),*) -> $ret;
    };
    (opt $mode:ident $recv:ident [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[allow(non_upper_case_globals)]
        const $method: ::core::option::Option<$crate::__iface_fn!($mode $recv [$($ty),*] $ret)> =
            ::core::option::Option::None;
    };
}

/// Function pointer type an implementer supplies for an optional entry
#[doc(hidden)]
#[macro_export]
macro_rules! __iface_fn {
    (sync exclusive [$($ty:ty),*] $ret:ty) => { fn(&mut Self $(, $ty)*) -> $ret };
    (sync shared [$($ty:ty),*] $ret:ty) => { fn(&Self $(, $ty)*) -> $ret };
    (sync free [$($ty:ty),*] $ret:ty) => { fn($($ty),*) -> $ret };
    (suspend exclusive [$($ty:ty),*] $ret:ty) => {
        for<'a> fn(&'a mut Self $(, $ty)*) -> $crate::LocalBoxFuture<'a, $ret>
    };
    (suspend shared [$($ty:ty),*] $ret:ty) => {
        for<'a> fn(&'a Self $(, $ty)*) -> $crate::LocalBoxFuture<'a, $ret>
    };
    (suspend free [$($ty:ty),*] $ret:ty) => { fn($($ty),*) -> $crate::LocalBoxFuture<'static, $ret> };
}

/// Dispatch table slot type for one entry
#[doc(hidden)]
#[macro_export]
macro_rules! __iface_slot {
    (req sync exclusive [$($ty:ty),*] $ret:ty) => { unsafe fn($crate::ErasedMut<'_> $(, $ty)*) -> $ret };
    (req sync shared [$($ty:ty),*] $ret:ty) => { unsafe fn($crate::Erased<'_> $(, $ty)*) -> $ret };
    (req sync free [$($ty:ty),*] $ret:ty) => { fn($($ty),*) -> $ret };
    (req suspend exclusive [$($ty:ty),*] $ret:ty) => {
        for<'a> unsafe fn($crate::ErasedMut<'a> $(, $ty)*) -> $crate::LocalBoxFuture<'a, $ret>
    };
    (req suspend shared [$($ty:ty),*] $ret:ty) => {
        for<'a> unsafe fn($crate::Erased<'a> $(, $ty)*) -> $crate::LocalBoxFuture<'a, $ret>
    };
    (req suspend free [$($ty:ty),*] $ret:ty) => { fn($($ty),*) -> $crate::LocalBoxFuture<'static, $ret> };
    (opt $mode:ident $recv:ident [$($ty:ty),*] $ret:ty) => {
        ::core::option::Option<$crate::__iface_slot!(req $mode $recv [$($ty),*] $ret)>
    };
}

/// Table slot value for concrete type `$t`
#[doc(hidden)]
#[macro_export]
macro_rules! __iface_bind {
    // Free entries need no erasure: the slot is the function itself
    ($imp:ident $t:ident; req sync free $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        <$t as $imp>::$method
    };
    ($imp:ident $t:ident; opt $mode:ident free $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        <$t as $imp>::$method
    };
    ($imp:ident $t:ident; req suspend free $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        fn thunk<C: $imp>($($arg: $ty),*) -> $crate::LocalBoxFuture<'static, $ret> {
            let future = ::std::boxed::Box::pin(<C as $imp>::$method($($crate::suspend::static_arg($arg)),*));
            // SAFETY: a free entry's future holds only its owned arguments
            unsafe { $crate::suspend::extend_future(future) }
        }
        thunk::<$t>
    }};

    ($imp:ident $t:ident; req sync exclusive $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<C: $imp>(this: $crate::ErasedMut<'_> $(, $arg: $ty)*) -> $ret {
            <C as $imp>::$method(this.cast::<C>() $(, $arg)*)
        }
        thunk::<$t>
    }};
    ($imp:ident $t:ident; req sync shared $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<C: $imp>(this: $crate::Erased<'_> $(, $arg: $ty)*) -> $ret {
            <C as $imp>::$method(this.cast::<C>() $(, $arg)*)
        }
        thunk::<$t>
    }};
    ($imp:ident $t:ident; req suspend exclusive $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<'a, C: $imp>(this: $crate::ErasedMut<'a> $(, $arg: $ty)*) -> $crate::LocalBoxFuture<'a, $ret> {
            let future = ::std::boxed::Box::pin(
                <C as $imp>::$method(this.cast::<C>() $(, $crate::suspend::static_arg($arg))*)
            );
            $crate::suspend::extend_future(future)
        }
        thunk::<$t>
    }};
    ($imp:ident $t:ident; req suspend shared $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<'a, C: $imp>(this: $crate::Erased<'a> $(, $arg: $ty)*) -> $crate::LocalBoxFuture<'a, $ret> {
            let future = ::std::boxed::Box::pin(
                <C as $imp>::$method(this.cast::<C>() $(, $crate::suspend::static_arg($arg))*)
            );
            $crate::suspend::extend_future(future)
        }
        thunk::<$t>
    }};

    // Optional entries: the slot stays empty unless the type opted in
    ($imp:ident $t:ident; opt sync exclusive $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<C: $imp>(this: $crate::ErasedMut<'_> $(, $arg: $ty)*) -> $ret {
            match <C as $imp>::$method {
                ::core::option::Option::Some(f) => f(this.cast::<C>() $(, $arg)*),
                ::core::option::Option::None => ::core::unreachable!("empty optional slot dispatched"),
            }
        }
        match <$t as $imp>::$method {
            ::core::option::Option::Some(_) => ::core::option::Option::Some(
                thunk::<$t> as $crate::__iface_slot!(req sync exclusive [$($ty),*] $ret)
            ),
            ::core::option::Option::None => ::core::option::Option::None,
        }
    }};
    ($imp:ident $t:ident; opt sync shared $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<C: $imp>(this: $crate::Erased<'_> $(, $arg: $ty)*) -> $ret {
            match <C as $imp>::$method {
                ::core::option::Option::Some(f) => f(this.cast::<C>() $(, $arg)*),
                ::core::option::Option::None => ::core::unreachable!("empty optional slot dispatched"),
            }
        }
        match <$t as $imp>::$method {
            ::core::option::Option::Some(_) => ::core::option::Option::Some(
                thunk::<$t> as $crate::__iface_slot!(req sync shared [$($ty),*] $ret)
            ),
            ::core::option::Option::None => ::core::option::Option::None,
        }
    }};
    ($imp:ident $t:ident; opt suspend exclusive $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<'a, C: $imp>(this: $crate::ErasedMut<'a> $(, $arg: $ty)*) -> $crate::LocalBoxFuture<'a, $ret> {
            match <C as $imp>::$method {
                ::core::option::Option::Some(f) => $crate::suspend::extend_future(
                    f(this.cast::<C>() $(, $crate::suspend::static_arg($arg))*)
                ),
                ::core::option::Option::None => ::core::unreachable!("empty optional slot dispatched"),
            }
        }
        match <$t as $imp>::$method {
            ::core::option::Option::Some(_) => ::core::option::Option::Some(
                thunk::<$t> as $crate::__iface_slot!(req suspend exclusive [$($ty),*] $ret)
            ),
            ::core::option::Option::None => ::core::option::Option::None,
        }
    }};
    ($imp:ident $t:ident; opt suspend shared $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {{
        unsafe fn thunk<'a, C: $imp>(this: $crate::Erased<'a> $(, $arg: $ty)*) -> $crate::LocalBoxFuture<'a, $ret> {
            match <C as $imp>::$method {
                ::core::option::Option::Some(f) => $crate::suspend::extend_future(
                    f(this.cast::<C>() $(, $crate::suspend::static_arg($arg))*)
                ),
                ::core::option::Option::None => ::core::unreachable!("empty optional slot dispatched"),
            }
        }
        match <$t as $imp>::$method {
            ::core::option::Option::Some(_) => ::core::option::Option::Some(
                thunk::<$t> as $crate::__iface_slot!(req suspend shared [$($ty),*] $ret)
            ),
            ::core::option::Option::None => ::core::option::Option::None,
        }
    }};
}

/// Call method on the wrapper for one entry
#[doc(hidden)]
#[macro_export]
macro_rules! __iface_call {
    ($table:ident; req sync exclusive [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&mut self $(, $arg: $ty)*) -> $ret {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            unsafe { slot(<S as $crate::Storage<$table>>::erased_mut(&mut self.storage) $(, $arg)*) }
        }
    };
    ($table:ident; req sync shared [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> $ret {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            unsafe { slot(<S as $crate::Storage<$table>>::erased(&self.storage) $(, $arg)*) }
        }
    };
    ($table:ident; req sync free [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> $ret {
            (<S as $crate::Storage<$table>>::table(&self.storage).$method)($($arg),*)
        }
    };
    ($table:ident; req suspend exclusive [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&mut self $(, $arg: $ty)*) -> $crate::Suspend<'_, $ret> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            $crate::Suspend::new(unsafe {
                slot(<S as $crate::Storage<$table>>::erased_mut(&mut self.storage) $(, $arg)*)
            })
        }
    };
    ($table:ident; req suspend shared [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> $crate::Suspend<'_, $ret> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            $crate::Suspend::new(unsafe {
                slot(<S as $crate::Storage<$table>>::erased(&self.storage) $(, $arg)*)
            })
        }
    };
    ($table:ident; req suspend free [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> $crate::Suspend<'static, $ret> {
            $crate::Suspend::new((<S as $crate::Storage<$table>>::table(&self.storage).$method)($($arg),*))
        }
    };

    // Optional entries answer `None` without invoking anything
    ($table:ident; opt sync exclusive [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&mut self $(, $arg: $ty)*) -> ::core::option::Option<$ret> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method?;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            ::core::option::Option::Some(unsafe {
                slot(<S as $crate::Storage<$table>>::erased_mut(&mut self.storage) $(, $arg)*)
            })
        }
    };
    ($table:ident; opt sync shared [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> ::core::option::Option<$ret> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method?;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            ::core::option::Option::Some(unsafe {
                slot(<S as $crate::Storage<$table>>::erased(&self.storage) $(, $arg)*)
            })
        }
    };
    ($table:ident; opt sync free [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> ::core::option::Option<$ret> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method?;
            ::core::option::Option::Some(slot($($arg),*))
        }
    };
    ($table:ident; opt suspend exclusive [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&mut self $(, $arg: $ty)*) -> ::core::option::Option<$crate::Suspend<'_, $ret>> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method?;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            ::core::option::Option::Some($crate::Suspend::new(unsafe {
                slot(<S as $crate::Storage<$table>>::erased_mut(&mut self.storage) $(, $arg)*)
            }))
        }
    };
    ($table:ident; opt suspend shared [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> ::core::option::Option<$crate::Suspend<'_, $ret>> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method?;
            // SAFETY: the storage hands out a pointer to the type the table was built for
            ::core::option::Option::Some($crate::Suspend::new(unsafe {
                slot(<S as $crate::Storage<$table>>::erased(&self.storage) $(, $arg)*)
            }))
        }
    };
    ($table:ident; opt suspend free [$($m:tt)*] $method:ident [$($arg:ident : $ty:ty),*] $ret:ty) => {
        $($m)*
        #[inline]
        pub fn $method(&self $(, $arg: $ty)*) -> ::core::option::Option<$crate::Suspend<'static, $ret>> {
            let slot = <S as $crate::Storage<$table>>::table(&self.storage).$method?;
            ::core::option::Option::Some($crate::Suspend::new(slot($($arg),*)))
        }
    };
}

/// Descriptor metadata words
#[doc(hidden)]
#[macro_export]
macro_rules! __iface_meta {
    (receiver exclusive) => { $crate::Receiver::Exclusive };
    (receiver shared) => { $crate::Receiver::Shared };
    (receiver free) => { $crate::Receiver::Free };
    (optional req) => { false };
    (optional opt) => { true };
    (suspends sync) => { false };
    (suspends suspend) => { true };
    (present req $slot:expr) => { true };
    (present opt $slot:expr) => { $slot.is_some() };
}
