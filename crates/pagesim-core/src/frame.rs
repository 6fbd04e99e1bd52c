//! Per-process frame management.

use pagesim_common::Page;

/// A frame holding one resident page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The page resident in this frame.
    page: Page,
    /// Reference bit for the clock replacement algorithm.
    referenced: bool,
}

impl Frame {
    /// Creates a frame for a newly admitted page with a clear reference bit.
    #[inline]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            referenced: false,
        }
    }

    /// Returns the resident page.
    #[inline]
    pub fn page(&self) -> Page {
        self.page
    }

    /// Returns the reference bit value.
    #[inline]
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }
}

/// Result of a clock sweep that replaced a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Slot that received the new page.
    pub slot: usize,
    /// Page that was evicted from the slot.
    pub victim: Page,
    /// Slots whose reference bit was cleared on the way, in sweep order.
    pub cleared: Vec<usize>,
}

/// Fixed-capacity array of frames owned by one process.
///
/// Slots fill from the front. The length never changes after construction;
/// eviction either shifts the whole array (LRU) or overwrites a slot (Clock).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTable {
    slots: Box<[Option<Frame>]>,
}

impl FrameTable {
    /// Creates an empty frame table with the given number of slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    pub fn resident_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if every slot holds a page.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Returns the slot holding `page`, if resident.
    pub fn position(&self, page: Page) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.is_some_and(|f| f.page == page))
    }

    /// Returns true if `page` is resident.
    #[inline]
    pub fn contains(&self, page: Page) -> bool {
        self.position(page).is_some()
    }

    /// Marks `page` referenced if it is resident. Returns true on a hit.
    pub fn touch(&mut self, page: Page) -> bool {
        match self.position(page) {
            Some(slot) => {
                if let Some(frame) = self.slots[slot].as_mut() {
                    frame.referenced = true;
                }
                true
            }
            None => false,
        }
    }

    /// Returns the frame in a slot.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Frame> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the resident pages in slot order.
    pub fn pages(&self) -> Vec<Page> {
        self.slots.iter().flatten().map(|f| f.page).collect()
    }

    /// Admits `page` into a table that still has free slots.
    ///
    /// Walks the slots from the front: an existing copy of `page` stops the
    /// walk (optionally setting its reference bit), otherwise the page is
    /// installed in the first empty slot. Returns the slot installed into,
    /// or `None` when the page was already resident.
    pub fn fill_first_empty(&mut self, page: Page, mark_existing: bool) -> Option<usize> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            match slot {
                None => {
                    *slot = Some(Frame::new(page));
                    return Some(index);
                }
                Some(frame) if frame.page == page => {
                    if mark_existing {
                        frame.referenced = true;
                    }
                    return None;
                }
                Some(_) => {}
            }
        }
        None
    }

    /// Evicts slot 0 by shifting every slot one position toward the front
    /// and installs `page` in the last slot. Returns the evicted page.
    pub fn shift_in(&mut self, page: Page) -> Option<Page> {
        let last = self.slots.len().checked_sub(1)?;
        let victim = self.slots[0].map(|f| f.page);
        self.slots.rotate_left(1);
        self.slots[last] = Some(Frame::new(page));
        victim
    }

    /// Second-chance sweep of a full table starting at `hand`.
    ///
    /// Each referenced frame passed over has its bit cleared; the first frame
    /// with a clear bit is overwritten with `page`. Terminates within two
    /// revolutions. Returns `None` if the table is empty-capacity or not full.
    pub fn sweep_replace(&mut self, page: Page, hand: usize) -> Option<SweepOutcome> {
        let len = self.slots.len();
        if len == 0 || !self.is_full() {
            return None;
        }

        let mut hand = hand % len;
        let mut cleared = Vec::new();
        for _ in 0..=len {
            let frame = self.slots[hand].as_mut()?;
            if !frame.referenced {
                let victim = frame.page;
                *frame = Frame::new(page);
                return Some(SweepOutcome {
                    slot: hand,
                    victim,
                    cleared,
                });
            }
            frame.referenced = false;
            cleared.push(hand);
            hand = (hand + 1) % len;
        }
        None
    }
}
