//! Method descriptors - the fixed shape an interface demands
//!
//! Design: every interface declared with [`interface!`](crate::interface) gets a
//! table type implementing [`Interface`]. The table doubles as the descriptor:
//! its `METHODS` list is the static metadata, its fields are the dispatch slots.

/// How a concrete callable receives its own state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// `&mut self` - needs mutation capability
    Exclusive,
    /// `&self` - read access only
    Shared,
    /// No self parameter; the instance is ignored
    Free,
}

impl Receiver {
    /// Whether dispatching this entry needs the erased instance pointer
    #[inline]
    pub const fn needs_instance(self) -> bool {
        !matches!(self, Receiver::Free)
    }
}

/// One named operation of an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodEntry {
    pub name: &'static str,
    pub receiver: Receiver,
    pub optional: bool,
    pub suspends: bool,
}

/// Descriptor metadata, implemented by every generated dispatch table
pub trait Interface: Sized + 'static {
    /// Interface name as declared
    const NAME: &'static str;

    /// Entries in declaration order (slot order of the table)
    const METHODS: &'static [MethodEntry];

    /// Whether this table has a callable for `name`
    ///
    /// Returns `None` for names the descriptor does not declare,
    /// `Some(false)` for optional entries the concrete type left out.
    fn provides(&self, name: &str) -> Option<bool>;

    /// Look up a descriptor entry by name
    fn method(name: &str) -> Option<&'static MethodEntry> {
        Self::METHODS.iter().find(|entry| entry.name == name)
    }

    /// Entries a conforming type must implement
    fn required() -> impl Iterator<Item = &'static MethodEntry> {
        Self::METHODS.iter().filter(|entry| !entry.optional)
    }
}

/// Per-(interface, concrete type) dispatch table
///
/// Implemented by `interface!` for every type implementing the generated
/// conformance trait. `TABLE` is evaluated at compile time; `table` hands out
/// the promoted `'static` copy shared by all instances of the pair.
pub trait TableFor<T>: Interface {
    const TABLE: Self;

    fn table() -> &'static Self;
}

/// Const check that no two entries share a name
pub const fn names_unique(methods: &[MethodEntry]) -> bool {
    let mut i = 0;
    while i < methods.len() {
        let mut j = i + 1;
        while j < methods.len() {
            if str_eq(methods[i].name, methods[j].name) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
