#![doc = r#"
Player configuration.

```rust
# use smfplay::prelude::*;
let config = PlayerConfig::default()
    .with_policy(SchedulingPolicy::EventPriority)
    .with_looping(true);
assert_eq!(config.max_tracks, 16);
```
"#]

use crate::handler::OutputPort;

/// How simultaneous events from several tracks are interleaved within a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulingPolicy {
    /// Drain every due event of track 0, then track 1, and so on
    #[default]
    TrackPriority,
    /// Take one due event from each track per round until a round yields none
    EventPriority,
}

/// Limits and defaults applied when a file is opened
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    /// Files declaring more tracks are rejected
    pub max_tracks: usize,
    /// Bytes of a sysex payload kept per event
    pub sysex_capacity: usize,
    /// Bytes of a meta payload kept per event
    pub meta_capacity: usize,
    /// Interleaving of tracks within a poll
    pub policy: SchedulingPolicy,
    /// Upper bound on events pulled from a track (or rounds) in one poll
    pub max_events_per_poll: usize,
    /// Restart automatically once every track has ended
    pub looping: bool,
    /// Passed to the handler with every channel message
    pub output_port: OutputPort,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_tracks: 16,
            sysex_capacity: 50,
            meta_capacity: 50,
            policy: SchedulingPolicy::TrackPriority,
            max_events_per_poll: 100,
            looping: false,
            output_port: OutputPort(0),
        }
    }
}

impl PlayerConfig {
    /// Set the maximum number of tracks
    pub fn with_max_tracks(mut self, max_tracks: usize) -> Self {
        self.max_tracks = max_tracks;
        self
    }

    /// Set the sysex receive buffer size
    pub fn with_sysex_capacity(mut self, capacity: usize) -> Self {
        self.sysex_capacity = capacity;
        self
    }

    /// Set the meta receive buffer size
    pub fn with_meta_capacity(mut self, capacity: usize) -> Self {
        self.meta_capacity = capacity;
        self
    }

    /// Set the scheduling policy
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the per-poll safety cap
    pub fn with_max_events_per_poll(mut self, max: usize) -> Self {
        self.max_events_per_poll = max;
        self
    }

    /// Enable or disable looping
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the output port handed to the channel handler
    pub fn with_output_port(mut self, port: OutputPort) -> Self {
        self.output_port = port;
        self
    }
}
