use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;

/// A single key/value pair stored in a [`Chain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    key: String,
    value: V,
}

impl<V> Entry<V> {
    /// Creates a detached entry.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value for in-place modification.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Overwrites the value, returning the previous one.
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Splits the entry into its key and value.
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

#[derive(Clone)]
struct Node<V> {
    entry: Entry<V>,
    next: Option<usize>,
}

/// An ordered, singly-linked sequence of entries.
///
/// Nodes live in an arena and link to their successor by slot index rather
/// than by pointer. Slots vacated by removals are recycled through a free
/// list, so a slot index is stable for as long as its entry is linked.
///
/// Positional operations treat the chain as a dense sequence: index `i` is
/// the `i`-th linked entry from the head regardless of which arena slot holds
/// it. Like any singly-linked list, [`len`](Chain::len), [`append`](Chain::append)
/// and positional access walk from the head; [`prepend`](Chain::prepend) does
/// not.
///
/// # Examples
///
/// ```rust
/// use chain_table::Chain;
///
/// let mut chain = Chain::new();
/// chain.append("b", 2);
/// chain.prepend("a", 1);
/// chain.append("d", 4);
/// chain.insert_at("c", 3, 2).unwrap();
///
/// assert_eq!(chain.len(), 4);
/// assert_eq!(chain.at(2).map(|e| *e.value()), Some(3));
/// assert_eq!(chain.to_string(), "(1) -> (2) -> (3) -> (4) -> null");
///
/// if let Some(entry) = chain.find_by_key_mut("a") {
///     *entry.value_mut() += 10;
/// }
/// assert_eq!(chain.find(&11), Some(0));
/// ```
#[derive(Clone)]
pub struct Chain<V> {
    nodes: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
        }
    }

    fn node(&self, slot: usize) -> Option<&Node<V>> {
        self.nodes.get(slot)?.as_ref()
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<V>> {
        self.nodes.get_mut(slot)?.as_mut()
    }

    fn alloc(&mut self, entry: Entry<V>, next: Option<usize>) -> usize {
        let node = Some(Node { entry, next });
        match self.free.pop() {
            Some(slot) => {
                debug_assert!(self.nodes[slot].is_none());
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Frees an already unlinked slot.
    fn release(&mut self, slot: usize) -> Option<Node<V>> {
        let node = self.nodes.get_mut(slot)?.take()?;
        self.free.push(slot);
        Some(node)
    }

    fn slots(&self) -> Slots<'_, V> {
        Slots {
            chain: self,
            cursor: self.head,
        }
    }

    fn slot_at(&self, index: usize) -> Option<usize> {
        self.slots().nth(index)
    }

    fn tail_slot(&self) -> Option<usize> {
        self.slots().last()
    }

    /// Returns the number of linked entries, walking the whole chain.
    pub fn len(&self) -> usize {
        self.slots().count()
    }

    /// Returns `true` if the chain holds no entries.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Unlinks and drops every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
    }

    /// Returns the first entry.
    pub fn head(&self) -> Option<&Entry<V>> {
        self.node(self.head?).map(|node| &node.entry)
    }

    /// Returns the last entry.
    pub fn tail(&self) -> Option<&Entry<V>> {
        self.node(self.tail_slot()?).map(|node| &node.entry)
    }

    /// Adds an entry after the current tail.
    pub fn append(&mut self, key: impl Into<String>, value: V) {
        self.append_entry(Entry::new(key, value));
    }

    fn append_entry(&mut self, entry: Entry<V>) {
        let tail = self.tail_slot();
        let slot = self.alloc(entry, None);
        match tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
    }

    /// Adds an entry before the current head.
    pub fn prepend(&mut self, key: impl Into<String>, value: V) {
        self.prepend_entry(Entry::new(key, value));
    }

    fn prepend_entry(&mut self, entry: Entry<V>) {
        let slot = self.alloc(entry, self.head);
        self.head = Some(slot);
    }

    /// Returns the entry at zero-based position `index`, if there is one.
    pub fn at(&self, index: usize) -> Option<&Entry<V>> {
        self.iter().nth(index)
    }

    /// Returns the entry at position `index` for in-place modification.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Entry<V>> {
        let slot = self.slot_at(index)?;
        self.node_mut(slot).map(|node| &mut node.entry)
    }

    /// Inserts an entry so that it lands at position `index`.
    ///
    /// Any `index` in `0..=len` is accepted; `len` appends. Out of range, the
    /// chain is left untouched and the entry is handed back.
    pub fn insert_at(
        &mut self,
        key: impl Into<String>,
        value: V,
        index: usize,
    ) -> Result<(), Entry<V>> {
        let entry = Entry::new(key, value);
        let len = self.len();
        if index > len {
            return Err(entry);
        }
        if index == 0 {
            self.prepend_entry(entry);
            return Ok(());
        }
        if index == len {
            self.append_entry(entry);
            return Ok(());
        }

        let Some(prev) = self.slot_at(index - 1) else {
            return Err(entry);
        };
        let next = self.node(prev).and_then(|node| node.next);
        let slot = self.alloc(entry, next);
        if let Some(node) = self.node_mut(prev) {
            node.next = Some(slot);
        }
        Ok(())
    }

    /// Removes and returns the entry at position `index`.
    ///
    /// Returns `None` and leaves the chain untouched when `index` is not in
    /// `0..len`.
    pub fn remove_at(&mut self, index: usize) -> Option<Entry<V>> {
        let highest = self.len().checked_sub(1)?;
        if index > highest {
            return None;
        }
        if index == 0 {
            return self.pop_front();
        }
        if index == highest {
            return self.pop();
        }

        let prev = self.slot_at(index - 1)?;
        let removed = self.node(prev)?.next?;
        let next = self.node(removed)?.next;
        if let Some(node) = self.node_mut(prev) {
            node.next = next;
        }
        self.release(removed).map(|node| node.entry)
    }

    fn pop_front(&mut self) -> Option<Entry<V>> {
        let slot = self.head?;
        let node = self.release(slot)?;
        self.head = node.next;
        Some(node.entry)
    }

    /// Removes and returns the last entry. Does nothing on an empty chain.
    pub fn pop(&mut self) -> Option<Entry<V>> {
        let len = self.len();
        match len {
            0 => None,
            1 => self.pop_front(),
            _ => {
                let prev = self.slot_at(len - 2)?;
                let last = self.node_mut(prev)?.next.take()?;
                self.release(last).map(|node| node.entry)
            }
        }
    }

    /// Returns `true` if any entry holds `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|entry| entry.value == *value)
    }

    /// Returns the position of the first entry holding `value`.
    pub fn find(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        self.iter().position(|entry| entry.value == *value)
    }

    /// Returns the first entry whose key equals `key`.
    pub fn find_by_key(&self, key: &str) -> Option<&Entry<V>> {
        self.iter().find(|entry| entry.key == key)
    }

    /// Returns the first entry whose key equals `key`, for in-place update.
    ///
    /// The returned reference is the stored entry itself; writing through it
    /// updates the chain without a second lookup.
    pub fn find_by_key_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        let slot = self
            .slots()
            .find(|&slot| self.node(slot).is_some_and(|node| node.entry.key == key))?;
        self.node_mut(slot).map(|node| &mut node.entry)
    }

    /// Iterates over the entries from head to tail.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots(),
        }
    }
}

impl<V: Debug> Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}

impl<V: Display> Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.iter() {
            write!(f, "({}) -> ", entry.value)?;
        }
        f.write_str("null")
    }
}

struct Slots<'a, V> {
    chain: &'a Chain<V>,
    cursor: Option<usize>,
}

impl<V> Iterator for Slots<'_, V> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        self.cursor = self.chain.node(slot)?.next;
        Some(slot)
    }
}

/// Borrowing iterator over a [`Chain`], head to tail.
pub struct Iter<'a, V> {
    slots: Slots<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let chain = self.slots.chain;
        let slot = self.slots.next()?;
        chain.node(slot).map(|node| &node.entry)
    }
}

/// Owning iterator over a [`Chain`], head to tail.
pub struct IntoIter<V> {
    chain: Chain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop_front()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = Entry<V>;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
