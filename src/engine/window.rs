/// Bounded FIFO of recent volumes with an incrementally maintained sum,
/// so push and average are both O(1). The average is meaningful from the
/// first sample; partial windows count.
#[derive(Debug, Clone)]
pub struct VolumeWindow {
    capacity: usize,
    buffer: Vec<f64>,
    head: usize,
    count: usize,
    sum: f64,
}

impl VolumeWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be > 0");
        Self {
            capacity,
            buffer: vec![0.0; capacity],
            head: 0,
            count: 0,
            sum: 0.0,
        }
    }

    /// Insert a volume, evicting the oldest entry once full.
    /// Returns the average over the window after the insert.
    pub fn push(&mut self, volume: f64) -> f64 {
        if self.count >= self.capacity {
            self.sum -= self.buffer[self.head];
        }
        self.buffer[self.head] = volume;
        self.sum += volume;
        self.head = (self.head + 1) % self.capacity;
        if self.count < self.capacity {
            self.count += 1;
        }
        self.sum / self.count as f64
    }

    /// Average over the current contents; 0.0 while empty.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
