#![warn(missing_docs)]
#![warn(clippy::all)]
#![doc = r#"
A decoder and real-time scheduler for Standard MIDI Files (SMF).

`smfplay` loads the header and track chunks of a `.mid` file, then lazily
decodes events from every track as wall-clock time advances. Each call to
[`MidiPlayer::poll`](crate::player::MidiPlayer::poll) converts elapsed
microseconds into ticks, hands those ticks to the tracks and forwards every
event that fires to a [`MidiHandler`](crate::handler::MidiHandler).

The player performs no waiting of its own. Drive it from a loop:

```no_run
use smfplay::prelude::*;

struct Print;

impl MidiHandler for Print {
    fn on_channel(&mut self, _port: OutputPort, message: &ChannelMessage) {
        println!("{message}");
    }
}

let mut player = MidiPlayer::open("song.mid", PlayerConfig::default(), Print)?;
while !player.is_eof() {
    player.poll();
    std::thread::sleep(std::time::Duration::from_micros(500));
}
# Ok::<(), smfplay::reader::ReaderError>(())
```

# Layout
- [`reader`]: the seekable byte cursor and variable-length quantity decoding
- [`file`]: header, timing and per-track decoding state
- [`message`]: the events handed to a handler
- [`clock`]: tempo, resolution and the derived microseconds per tick
- [`player`]: the playback session and its scheduling policies
"#]

mod error;
pub use error::*;

pub mod clock;
pub mod config;
pub mod file;
pub mod handler;
pub mod message;
pub mod micros;
pub mod player;
pub mod reader;
pub mod time;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        clock::*, config::*, error::*, file::*, handler::*, message::*, micros::*, player::*,
        reader::*, time::*,
    };
}
