#![doc = r#"
Sources of "now" for the playback clock.

The player only ever compares two readings of the same source, so any
monotonically non-decreasing microsecond counter will do.
"#]

use crate::micros::UMicros;
use std::cell::Cell;
use std::time::Instant;

/// A monotonically non-decreasing microsecond counter
pub trait TimeSource {
    /// Microseconds since an arbitrary fixed origin
    fn now(&self) -> UMicros;
}

/// Wall-clock time measured from when the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> UMicros {
        self.origin.elapsed().into()
    }
}

#[doc = r#"
A clock that only moves when told to.

Clones share nothing; hand the player a reference (`&ManualClock`) when the
caller needs to keep advancing it.

```rust
# use smfplay::prelude::*;
let clock = ManualClock::new();
clock.advance(UMicros::from_ms(5));
assert_eq!(clock.now(), UMicros::new(5_000));
```
"#]
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// A clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, by: UMicros) {
        self.now.set(self.now.get() + by.us());
    }

    /// Jump to an absolute reading. Readings earlier than the current one are
    /// ignored.
    pub fn set(&self, to: UMicros) {
        if to.us() > self.now.get() {
            self.now.set(to.us());
        }
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> UMicros {
        UMicros::new(self.now.get())
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> UMicros {
        (**self).now()
    }
}
