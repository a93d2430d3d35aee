/// Fixed-capacity circular log indexed by a monotonically advancing write
/// cursor. Writing never blocks: once the log is full every push replaces the
/// oldest slot.
#[derive(Debug, Clone)]
pub struct Ring<T, const N: usize> {
    slots: Vec<T>,
    head: u64,
}

impl<T: Default, const N: usize> Default for Ring<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default, const N: usize> Ring<T, N> {
    pub fn new() -> Self {
        Self {
            slots: (0..N).map(|_| T::default()).collect(),
            head: 0,
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = T::default();
        }
        self.head = 0;
    }
}

impl<T, const N: usize> Ring<T, N> {
    pub const CAPACITY: usize = N;

    const MASK: u64 = {
        assert!(N.is_power_of_two(), "ring capacity must be a power of two");
        (N - 1) as u64
    };

    fn index(cursor: u64) -> usize {
        (cursor & Self::MASK) as usize
    }

    /// Stores `value` at the write cursor and returns the cursor it was
    /// written at.
    pub fn push(&mut self, value: T) -> u64 {
        let cursor = self.head;
        self.slots[Self::index(cursor)] = value;
        self.head = self.head.wrapping_add(1);
        cursor
    }

    /// Total number of values ever pushed.
    pub fn head(&self) -> u64 {
        self.head
    }

    pub fn len(&self) -> usize {
        self.head.min(N as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.head == 0
    }

    /// Cursor of the oldest value still stored.
    pub fn tail(&self) -> u64 {
        self.head.saturating_sub(N as u64)
    }

    pub fn get(&self, cursor: u64) -> Option<&T> {
        if cursor >= self.head || cursor < self.tail() {
            return None;
        }
        self.slots.get(Self::index(cursor))
    }

    pub fn latest(&self) -> Option<&T> {
        self.head.checked_sub(1).and_then(|cursor| self.get(cursor))
    }

    pub fn latest_mut(&mut self) -> Option<&mut T> {
        let cursor = self.head.checked_sub(1)?;
        self.slots.get_mut(Self::index(cursor))
    }

    /// Stored values, oldest first by cursor order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (self.tail()..self.head).map(move |cursor| &self.slots[Self::index(cursor)])
    }

    /// Every slot, starting at the one the next push will overwrite. Slots
    /// never written hold `T::default()`.
    pub fn slots(&self) -> impl Iterator<Item = &T> + '_ {
        let start = self.head;
        (0..N as u64).map(move |offset| &self.slots[Self::index(start.wrapping_add(offset))])
    }
}
