#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
    /// Bumped each time the slot is reused, so old handles stop matching.
    pub(crate) generation: u32,
    /// `None` once the slot has been released to the free stack.
    pub(crate) value: Option<T>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, generation: u32) -> Self {
        Self {
            prev: None,
            next: None,
            generation,
            value: Some(value),
        }
    }

    /// Is this slot holding a live element?
    pub(crate) fn is_live(&self) -> bool {
        self.value.is_some()
    }
}
