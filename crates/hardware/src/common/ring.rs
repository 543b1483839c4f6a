//! Bounded ring buffer with stable slot indices.
//!
//! The free list, the reorder buffer and the load/store queue are all FIFOs of
//! fixed capacity whose slots are referenced by index from other structures.
//! This module provides the shared circular storage:
//! 1. **Allocation:** `push_back` returns the slot index the value landed in.
//! 2. **Retirement:** `pop_front` removes the oldest value.
//! 3. **Squash:** `truncate_after` and `pop_back_while` remove the youngest values.
//! 4. **Ordering:** `age_of` reports the distance of a slot from the head.

/// Fixed-capacity circular FIFO. Occupied slots keep their index until removed.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    /// Slot storage; `None` marks a free slot.
    slots: Vec<Option<T>>,
    /// Index of the oldest value.
    head: usize,
    /// Index where the next value will be placed.
    tail: usize,
    /// Number of occupied slots.
    count: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Slot index of the oldest value, if any.
    #[inline]
    pub fn head_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.head)
        }
    }

    /// Slot index of the youngest value, if any.
    pub fn tail_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.wrap_back(self.tail))
        }
    }

    /// Appends a value at the tail.
    ///
    /// Returns the slot index, or hands the value back if the ring is full.
    pub fn push_back(&mut self, value: T) -> Result<usize, T> {
        if self.is_full() {
            return Err(value);
        }
        let idx = self.tail;
        self.slots[idx] = Some(value);
        self.tail = self.wrap_forward(idx);
        self.count += 1;
        Ok(idx)
    }

    /// Removes and returns the oldest value.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = self.wrap_forward(self.head);
        self.count -= 1;
        value
    }

    /// Removes and returns the youngest value.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.tail = self.wrap_back(self.tail);
        self.count -= 1;
        self.slots[self.tail].take()
    }

    /// Returns the oldest value.
    pub fn front(&self) -> Option<&T> {
        self.head_index().and_then(|idx| self.slots[idx].as_ref())
    }

    /// Returns the youngest value.
    pub fn back(&self) -> Option<&T> {
        self.tail_index().and_then(|idx| self.slots[idx].as_ref())
    }

    /// Returns the value in slot `idx`, if occupied.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Returns the value in slot `idx` mutably, if occupied.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Distance of slot `idx` from the head (0 for the oldest value).
    ///
    /// Returns `None` for an unoccupied slot.
    pub fn age_of(&self, idx: usize) -> Option<usize> {
        self.get(idx)?;
        let cap = self.capacity();
        Some((idx + cap - self.head) % cap)
    }

    /// Iterates over `(slot, value)` pairs from oldest to youngest.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        let cap = self.capacity();
        (0..self.count).filter_map(move |offset| {
            let idx = (self.head + offset) % cap;
            self.slots[idx].as_ref().map(|value| (idx, value))
        })
    }

    /// Iterates mutably over `(slot, value)` pairs in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_mut().map(|value| (idx, value)))
    }

    /// Removes every value younger than slot `idx`.
    ///
    /// Returns the removed `(slot, value)` pairs oldest first. Nothing is
    /// removed if `idx` is not occupied.
    pub fn truncate_after(&mut self, idx: usize) -> Vec<(usize, T)> {
        let Some(age) = self.age_of(idx) else {
            return Vec::new();
        };
        let mut removed = Vec::with_capacity(self.count - age - 1);
        while self.count > age + 1 {
            let slot = self.wrap_back(self.tail);
            if let Some(value) = self.pop_back() {
                removed.push((slot, value));
            }
        }
        removed.reverse();
        removed
    }

    /// Pops values from the tail while `pred` holds for the youngest one.
    pub fn pop_back_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut removed = Vec::new();
        while self.back().is_some_and(&mut pred) {
            if let Some(value) = self.pop_back() {
                removed.push(value);
            }
        }
        removed
    }

    #[inline]
    fn wrap_forward(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }

    #[inline]
    fn wrap_back(&self, idx: usize) -> usize {
        (idx + self.capacity() - 1) % self.capacity()
    }
}

impl<T: PartialEq> RingBuffer<T> {
    /// Returns true if any occupied slot holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|(_, v)| v == value)
    }
}
