use crate::{errors::ListError, handle::Handle, node::Node};
use core::fmt;
use core::iter::FusedIterator;

/// A doubly-linked list whose nodes live in an arena addressed by slot index.
///
/// Released slots go onto a free stack and are reused by later insertions, so
/// the arena never grows past the peak length of the list.
#[derive(Clone)]
pub struct OrderedList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// Iterator over values from head to tail.
pub struct Iter<'a, T> {
    list: &'a OrderedList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the list empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First value, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.nodes[id].value.as_ref())
    }

    /// Last value, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.nodes[id].value.as_ref())
    }

    /// Handle of the head node.
    pub fn head(&self) -> Option<Handle> {
        self.head.map(|id| self.handle(id))
    }

    /// Handle of the tail node.
    pub fn tail(&self) -> Option<Handle> {
        self.tail.map(|id| self.handle(id))
    }

    /// Get a reference by handle (if its node is still in the list).
    pub fn get(&self, h: Handle) -> Option<&T> {
        self.live(h).and_then(|n| n.value.as_ref())
    }

    /// Handle of the node following `h`.
    pub fn next(&self, h: Handle) -> Option<Handle> {
        self.live(h).and_then(|n| n.next).map(|id| self.handle(id))
    }

    /// Handle of the node preceding `h`.
    pub fn prev(&self, h: Handle) -> Option<Handle> {
        self.live(h).and_then(|n| n.prev).map(|id| self.handle(id))
    }

    /// Insert `value` as the new head.
    pub fn prepend(&mut self, value: T) -> Handle {
        let id = self.alloc(value);
        match self.head {
            Some(head) => self.link_before(head, id),
            None => self.link_first(id),
        }
        self.handle(id)
    }

    /// Insert `value` as the new tail.
    pub fn append(&mut self, value: T) -> Handle {
        let id = self.alloc(value);
        match self.tail {
            Some(tail) => {
                self.nodes[id].prev = Some(tail);
                self.nodes[tail].next = Some(id);
                self.tail = Some(id);
                self.len += 1;
            }
            None => self.link_first(id),
        }
        self.handle(id)
    }

    /// Insert `value` so that it ends up at position `index`.
    ///
    /// `index == len()` appends. Anything larger is rejected before the list
    /// is touched.
    pub fn insert_at(&mut self, value: T, index: usize) -> Result<Handle, ListError> {
        if index > self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if index == 0 {
            return Ok(self.prepend(value));
        }
        if index == self.len {
            return Ok(self.append(value));
        }
        let anchor = self.slot_at(index);
        let id = self.alloc(value);
        self.link_before(anchor, id);
        Ok(self.handle(id))
    }

    /// Remove the element at `index`, returning its value.
    pub fn delete_at(&mut self, index: usize) -> Result<T, ListError> {
        if index >= self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let id = self.slot_at(index);
        Ok(self.unlink(id))
    }

    /// Drop every element and release the arena slots.
    ///
    /// Slots stay allocated so their generations keep outstanding handles
    /// stale.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.prev = None;
            node.next = None;
            node.value = None;
        }
        self.free = (0..self.nodes.len()).rev().collect();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate values in list order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn handle(&self, id: usize) -> Handle {
        Handle {
            slot: id,
            generation: self.nodes[id].generation,
        }
    }

    fn live(&self, h: Handle) -> Option<&Node<T>> {
        self.nodes
            .get(h.slot)
            .filter(|n| n.is_live() && n.generation == h.generation)
    }

    fn value(&self, id: usize) -> &T {
        self.nodes[id].value.as_ref().expect("linked node has value")
    }

    fn alloc(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(id) => {
                let generation = self.nodes[id].generation.wrapping_add(1);
                self.nodes[id] = Node::new(value, generation);
                id
            }
            None => {
                self.nodes.push(Node::new(value, 0));
                self.nodes.len() - 1
            }
        }
    }

    fn link_first(&mut self, id: usize) {
        debug_assert_eq!(self.len, 0);
        self.head = Some(id);
        self.tail = Some(id);
        self.len = 1;
    }

    /// Splice the detached node `id` in front of the linked node `anchor`.
    fn link_before(&mut self, anchor: usize, id: usize) {
        let prev = self.nodes[anchor].prev;
        self.nodes[id].prev = prev;
        self.nodes[id].next = Some(anchor);
        self.nodes[anchor].prev = Some(id);
        match prev {
            Some(p) => self.nodes[p].next = Some(id),
            None => self.head = Some(id),
        }
        self.len += 1;
    }

    fn unlink(&mut self, id: usize) -> T {
        let node = &mut self.nodes[id];
        let prev = node.prev.take();
        let next = node.next.take();
        let value = node.value.take().expect("linked node has value");

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.free.push(id);
        self.len -= 1;
        value
    }

    /// Slot of the node at `index`; caller guarantees `index < len`.
    fn slot_at(&self, index: usize) -> usize {
        let mut cur = self.head.expect("non-empty list has a head");
        for _ in 0..index {
            cur = self.nodes[cur].next.expect("index within len");
        }
        cur
    }
}

impl<T: Ord> OrderedList<T> {
    /// Insert `value` keeping the list in non-decreasing order.
    ///
    /// Assumes the list is already sorted. Equal elements keep insertion
    /// order: the new value goes after every element that compares equal.
    pub fn insert_sorted(&mut self, value: T) -> Handle {
        if self.back().map_or(true, |last| *last <= value) {
            return self.append(value);
        }

        let mut cur = self.head;
        while let Some(id) = cur {
            if *self.value(id) > value {
                break;
            }
            cur = self.nodes[id].next;
        }

        // The tail compares greater, so the scan always stops on a node.
        let anchor = cur.expect("tail is greater than value");
        let id = self.alloc(value);
        self.link_before(anchor, id);
        self.handle(id)
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for OrderedList<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let id = self.front?;
        let node = &list.nodes[id];
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let id = self.back?;
        let node = &list.nodes[id];
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn values<T: Clone>(list: &OrderedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    /// Walks the chain both ways and checks every linkage invariant.
    fn assert_linked<T>(list: &OrderedList<T>) {
        let mut forward = Vec::new();
        let mut cur = list.head;
        let mut prev = None;
        while let Some(id) = cur {
            assert!(list.nodes[id].is_live());
            assert_eq!(list.nodes[id].prev, prev, "back link of slot {id}");
            forward.push(id);
            prev = cur;
            cur = list.nodes[id].next;
        }
        assert_eq!(prev, list.tail, "forward walk must end on the tail");

        let mut backward = Vec::new();
        let mut cur = list.tail;
        while let Some(id) = cur {
            backward.push(id);
            cur = list.nodes[id].prev;
        }
        backward.reverse();

        assert_eq!(forward.len(), list.len());
        assert_eq!(forward, backward);
        if list.is_empty() {
            assert!(list.head.is_none() && list.tail.is_none());
        }
        if list.len() == 1 {
            assert_eq!(list.head, list.tail);
        }
    }

    #[test]
    fn basic_usage() {
        let mut list = OrderedList::new();
        list.append("B");
        list.prepend("A");
        list.append("D");
        list.insert_at("C", 2).unwrap();

        assert_eq!(values(&list), vec!["A", "B", "C", "D"]);
        assert_eq!(list.front(), Some(&"A"));
        assert_eq!(list.back(), Some(&"D"));
        assert_eq!(list.len(), 4);
        assert_linked(&list);

        assert_eq!(list.delete_at(1), Ok("B"));
        assert_eq!(values(&list), vec!["A", "C", "D"]);
        assert_linked(&list);
    }

    #[test]
    fn empty_list_has_no_boundaries() {
        let list: OrderedList<u32> = OrderedList::new();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.head(), None);
        assert_eq!(list.iter().next(), None);
        assert_linked(&list);
    }

    #[test]
    fn single_element_is_head_and_tail() {
        let mut list = OrderedList::new();
        let h = list.prepend(7);
        assert_eq!(list.head(), Some(h));
        assert_eq!(list.tail(), Some(h));
        assert_eq!(list.next(h), None);
        assert_eq!(list.prev(h), None);
        assert_linked(&list);

        assert_eq!(list.delete_at(0), Ok(7));
        assert!(list.is_empty());
        assert_linked(&list);
    }

    #[test]
    fn out_of_range_leaves_list_unchanged() {
        let mut list: OrderedList<u32> = (1..=3).collect();

        assert_eq!(
            list.insert_at(9, 4),
            Err(ListError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(
            list.delete_at(3),
            Err(ListError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_linked(&list);

        let mut empty: OrderedList<u32> = OrderedList::new();
        assert!(empty.delete_at(0).is_err());
        assert!(empty.insert_at(1, 0).is_ok());
    }

    #[test]
    fn insert_at_len_appends() {
        let mut list: OrderedList<u32> = (1..=3).collect();
        list.insert_at(4, 3).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
        assert_linked(&list);
    }

    #[test]
    fn handles_walk_both_directions() {
        let list: OrderedList<char> = "abcd".chars().collect();

        let mut seen = Vec::new();
        let mut cur = list.head();
        while let Some(h) = cur {
            seen.push(*list.get(h).unwrap());
            cur = list.next(h);
        }
        assert_eq!(seen, vec!['a', 'b', 'c', 'd']);

        let mut seen = Vec::new();
        let mut cur = list.tail();
        while let Some(h) = cur {
            seen.push(*list.get(h).unwrap());
            cur = list.prev(h);
        }
        assert_eq!(seen, vec!['d', 'c', 'b', 'a']);
    }

    #[test]
    fn stale_handle_reads_nothing() {
        let mut list = OrderedList::new();
        list.append(1);
        let h = list.append(2);
        list.delete_at(1).unwrap();
        assert_eq!(list.get(h), None);
        assert_eq!(list.next(h), None);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list: OrderedList<u32> = (0..4).collect();
        list.delete_at(1).unwrap();
        list.delete_at(1).unwrap();
        list.append(10);
        list.append(11);
        assert_eq!(list.nodes.len(), 4);
        assert_eq!(values(&list), vec![0, 3, 10, 11]);
        assert_linked(&list);
    }

    #[test]
    fn insert_sorted_places_ties_after_equals() {
        let mut list = OrderedList::new();
        for pair in [(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')] {
            list.insert_sorted(Keyed(pair.0, pair.1));
        }
        let got: Vec<_> = list.iter().map(|k| (k.0, k.1)).collect();
        assert_eq!(got, vec![(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c')]);
        assert_linked(&list);
    }

    #[test]
    fn iterator_is_double_ended_and_exact() {
        let list: OrderedList<u32> = (1..=5).collect();
        let mut it = list.iter();
        assert_eq!(it.len(), 5);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&5));
        assert_eq!(it.len(), 3);
        assert_eq!(it.collect::<Vec<_>>(), vec![&2, &3, &4]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn clear_releases_every_slot() {
        let mut list: OrderedList<u32> = (0..8).collect();
        list.clear();
        assert!(list.is_empty());
        assert!(list.nodes.iter().all(|n| !n.is_live()));
        assert_eq!(list.free.len(), 8);
        assert_linked(&list);

        list.extend(10..18);
        assert_eq!(list.nodes.len(), 8);
        assert_eq!(values(&list), (10..18).collect::<Vec<_>>());
        assert_linked(&list);
    }

    #[test]
    fn handle_stays_stale_after_slot_reuse() {
        let mut list = OrderedList::new();
        list.append(1);
        let gone = list.append(2);
        list.delete_at(1).unwrap();

        let fresh = list.append(3);
        assert_eq!(fresh.as_raw(), gone.as_raw());
        assert_eq!(list.get(gone), None);
        assert_eq!(list.prev(gone), None);
        assert_eq!(list.get(fresh), Some(&3));
        assert_eq!(list.tail(), Some(fresh));
    }

    #[test]
    fn handle_stays_stale_after_clear() {
        let mut list = OrderedList::new();
        let old = list.append('a');
        list.clear();
        list.append('b');
        assert_eq!(list.get(old), None);
        assert_eq!(list.front(), Some(&'b'));
    }

    #[test]
    fn insert_at_len_is_accepted() {
        let mut list = OrderedList::new();
        assert!(list.insert_at('a', 0).is_ok());
        assert!(list.insert_at('b', list.len()).is_ok());
        assert!(list.insert_at('c', list.len()).is_ok());
        assert_eq!(values(&list), vec!['a', 'b', 'c']);
        assert_eq!(
            list.insert_at('d', list.len() + 1),
            Err(ListError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_linked(&list);
    }

    /// Compares on the key only, so ties are visible through the tag.
    #[derive(Debug, Clone, Copy)]
    struct Keyed(u32, char);

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }
    impl Eq for Keyed {}
    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }

    /// Counts how many times it has been dropped.
    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn teardown_drops_every_value_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut list = OrderedList::new();
            for _ in 0..6 {
                list.append(Tracked(Rc::clone(&drops)));
            }
            list.prepend(Tracked(Rc::clone(&drops)));
            let removed = list.delete_at(3).unwrap();
            drop(removed);
            assert_eq!(drops.get(), 1);
            // Reuse the freed slot so teardown sees a recycled node.
            list.insert_at(Tracked(Rc::clone(&drops)), 2).unwrap();
            assert_eq!(list.len(), 7);
        }
        assert_eq!(drops.get(), 8);
    }

    #[test]
    fn clear_drops_every_value_once() {
        let drops = Rc::new(Cell::new(0));
        let mut list = OrderedList::new();
        for _ in 0..4 {
            list.append(Tracked(Rc::clone(&drops)));
        }
        list.clear();
        assert_eq!(drops.get(), 4);
        drop(list);
        assert_eq!(drops.get(), 4);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Prepend(u32),
        Append(u32),
        InsertAt(u32, usize),
        DeleteAt(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u32>().prop_map(Op::Prepend),
            any::<u32>().prop_map(Op::Append),
            (any::<u32>(), 0_usize..40).prop_map(|(v, i)| Op::InsertAt(v, i)),
            (0_usize..40).prop_map(Op::DeleteAt),
        ]
    }

    proptest! {
        #[test]
        fn prop_links_match_a_vec_model(ops in proptest::collection::vec(op(), 0..120)) {
            let mut list = OrderedList::new();
            let mut model: Vec<u32> = Vec::new();

            for op in ops {
                match op {
                    Op::Prepend(v) => {
                        list.prepend(v);
                        model.insert(0, v);
                    }
                    Op::Append(v) => {
                        list.append(v);
                        model.push(v);
                    }
                    Op::InsertAt(v, i) => {
                        let res = list.insert_at(v, i);
                        if i <= model.len() {
                            prop_assert!(res.is_ok());
                            model.insert(i, v);
                        } else {
                            prop_assert!(res.is_err());
                        }
                    }
                    Op::DeleteAt(i) => {
                        let res = list.delete_at(i);
                        if i < model.len() {
                            prop_assert_eq!(res, Ok(model.remove(i)));
                        } else {
                            prop_assert!(res.is_err());
                        }
                    }
                }
                assert_linked(&list);
                prop_assert_eq!(values(&list), model.clone());
            }
        }

        #[test]
        fn prop_insert_sorted_is_non_decreasing(keys in proptest::collection::vec(0_u32..50, 0..100)) {
            let mut list = OrderedList::new();
            for k in &keys {
                list.insert_sorted(*k);
            }
            assert_linked(&list);

            let got = values(&list);
            prop_assert!(got.windows(2).all(|w| w[0] <= w[1]));

            let mut expected = keys.clone();
            expected.sort();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn prop_delete_then_reinsert_restores(
            items in proptest::collection::vec(any::<u32>(), 1..40),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut list: OrderedList<u32> = items.iter().copied().collect();
            let i = pick.index(items.len());

            let removed = list.delete_at(i).unwrap();
            list.insert_at(removed, i).unwrap();

            assert_linked(&list);
            prop_assert_eq!(values(&list), items);
        }
    }
}
