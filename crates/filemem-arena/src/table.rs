//! Slot+generation table mapping [`BufferHandle`]s to arena entries.
//!
//! Released handles carry a stale generation and resolve to `None`, so a
//! dangling handle read back out of a locator can never reach another
//! buffer's storage. Releasing twice is a harmless `None`.

use filemem_core::BufferHandle;

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// Generational handle table with slot reuse through a free list.
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Store a value and return the handle that names it.
    ///
    /// `None` once every 32-bit slot index is in use or retired; the
    /// value is dropped and the table is unchanged.
    pub fn insert(&mut self, value: T) -> Option<BufferHandle> {
        let handle = if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            BufferHandle::new(slot_idx, slot.generation)
        } else {
            let slot_idx = next_slot_index(self.slots.len())?;
            self.slots.push(Slot {
                generation: 0,
                data: Some(value),
            });
            BufferHandle::new(slot_idx, 0)
        };
        self.live += 1;
        Some(handle)
    }

    /// Resolve a handle. `None` if it is stale or was never issued.
    pub fn get(&self, handle: BufferHandle) -> Option<&T> {
        let slot = self.slots.get(handle.slot() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.data.as_ref()
    }

    /// Resolve a handle mutably. `None` if it is stale or was never issued.
    pub fn get_mut(&mut self, handle: BufferHandle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.slot() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.data.as_mut()
    }

    /// Remove and return the value behind a handle.
    ///
    /// Bumps the slot generation so the handle goes stale. A slot whose
    /// generation wraps back to 0 is retired instead of recycled, since a
    /// wrapped generation would let first-epoch handles resolve again.
    pub fn remove(&mut self, handle: BufferHandle) -> Option<T> {
        let slot_idx = handle.slot();
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.data.take()?;
        self.live -= 1;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        Some(value)
    }

    /// Whether the handle resolves to a live value.
    pub fn contains(&self, handle: BufferHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the table holds no live values.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Handles of all live values, in slot order.
    pub fn handles(&self) -> impl Iterator<Item = BufferHandle> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.data
                .as_ref()
                .map(|_| BufferHandle::new(idx as u32, slot.generation))
        })
    }
}

/// Index for a slot appended to a table of `len` slots, if it fits in
/// the handle's 32-bit slot field.
fn next_slot_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut table = HandleTable::new();
        let h = table.insert(b"abc".to_vec()).unwrap();
        assert_eq!(table.get(h).map(Vec::as_slice), Some(&b"abc"[..]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn get_mut_modifies_value() {
        let mut table = HandleTable::new();
        let h = table.insert(10i32).unwrap();
        *table.get_mut(h).unwrap() = 20;
        assert_eq!(table.get(h), Some(&20));
    }

    #[test]
    fn removed_handle_goes_stale() {
        let mut table = HandleTable::new();
        let h = table.insert(99i32).unwrap();
        assert_eq!(table.remove(h), Some(99));
        assert_eq!(table.get(h), None);
        assert_eq!(table.get_mut(h), None);
        assert!(!table.contains(h));
        assert!(table.is_empty());
    }

    #[test]
    fn double_remove_is_none() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32).unwrap();
        assert_eq!(table.remove(h), Some(1));
        assert_eq!(table.remove(h), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut table = HandleTable::new();
        let h1 = table.insert(1i32).unwrap();
        table.remove(h1);
        let h2 = table.insert(2i32).unwrap();
        assert_eq!(h1.slot(), h2.slot());
        assert_eq!(h2.generation(), h1.generation() + 1);
        assert_eq!(table.get(h2), Some(&2));
        assert_eq!(table.get(h1), None);
    }

    #[test]
    fn never_issued_handle_is_none() {
        let table: HandleTable<i32> = HandleTable::new();
        assert_eq!(table.get(BufferHandle::new(999, 0)), None);
        assert_eq!(table.get(BufferHandle::from_raw(u64::MAX)), None);
    }

    #[test]
    fn handles_lists_live_entries_only() {
        let mut table = HandleTable::new();
        let a = table.insert('a').unwrap();
        let b = table.insert('b').unwrap();
        let c = table.insert('c').unwrap();
        table.remove(b);
        assert_eq!(table.handles().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32).unwrap();
        table.remove(h);

        table.slots[0].generation = u32::MAX;
        let h_last = table.insert(2i32).unwrap();
        assert_eq!(h_last.generation(), u32::MAX);

        // Generation wraps to 0: the slot must not be recycled.
        table.remove(h_last);
        assert_eq!(table.slots[0].generation, 0);
        assert!(!table.free_list.contains(&0));

        // First-epoch handle must not resolve to anything.
        assert_eq!(table.get(BufferHandle::new(0, 0)), None);

        let fresh = table.insert(3i32).unwrap();
        assert_ne!(fresh.slot(), 0, "retired slot must not be reused");
    }

    #[test]
    fn slot_index_space_is_bounded_by_u32() {
        assert_eq!(next_slot_index(0), Some(0));
        assert_eq!(next_slot_index(u32::MAX as usize), Some(u32::MAX));
        if let Some(past_end) = (u32::MAX as usize).checked_add(1) {
            assert_eq!(next_slot_index(past_end), None);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn len_tracks_inserts_minus_removes(
                ops in proptest::collection::vec(any::<bool>(), 1..64),
            ) {
                let mut table = HandleTable::new();
                let mut live = Vec::new();
                for (i, insert) in ops.into_iter().enumerate() {
                    if insert || live.is_empty() {
                        live.push(table.insert(i).unwrap());
                    } else {
                        let h = live.remove(i % live.len());
                        prop_assert!(table.remove(h).is_some());
                    }
                    prop_assert_eq!(table.len(), live.len());
                }
                for h in &live {
                    prop_assert!(table.contains(*h));
                }
            }
        }
    }
}
