use crate::pptr::PPtr;

/// A value holding weak references to other objects.
///
/// Enumeration is lazy and recomputed on every call; it has no side effects
/// and can be restarted any number of times. Null references are yielded
/// like any other, filtering them is the consumer's job.
pub trait Dependent {
    fn dependencies(&self) -> impl Iterator<Item = PPtr> + '_;
}

impl<T: Dependent> Dependent for [T] {
    fn dependencies(&self) -> impl Iterator<Item = PPtr> + '_ {
        self.iter().flat_map(|item| item.dependencies())
    }
}

impl Dependent for PPtr {
    fn dependencies(&self) -> impl Iterator<Item = PPtr> + '_ {
        std::iter::once(*self)
    }
}
