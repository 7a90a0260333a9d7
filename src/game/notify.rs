use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Discrete events that the game reports to the player besides the display
#[derive(Clone, Copy, Debug, Deserialize, Enum, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Notification {
    AteFood,
    CrossedMilestone,
    BeatHighScore,
    AteBonus,
    GameOver,
}

/// Something that announces [`Notification`]s, e.g., by making a sound
pub(crate) trait NotificationSink {
    /// # Errors
    ///
    /// Returns `Err` if the announcement could not be made.  Callers are
    /// expected to carry on regardless.
    fn notify(&mut self, event: Notification) -> io::Result<()>;
}

/// Pass `event` to `sink`, logging and discarding any failure
pub(crate) fn deliver(sink: &mut dyn NotificationSink, event: Notification) {
    if let Err(e) = sink.notify(event) {
        tracing::warn!(?event, error = %e, "Failed to deliver notification");
    }
}

/// Rings the terminal bell for a chosen set of events
#[derive(Clone, Debug)]
pub(crate) struct Bell<W = io::Stdout> {
    out: W,
    events: EnumMap<Notification, bool>,
}

impl Bell<io::Stdout> {
    pub(crate) fn new<I>(events: I) -> Bell<io::Stdout>
    where
        I: IntoIterator<Item = Notification>,
    {
        Bell::with_writer(io::stdout(), events)
    }
}

impl<W: Write> Bell<W> {
    pub(crate) fn with_writer<I>(out: W, events: I) -> Bell<W>
    where
        I: IntoIterator<Item = Notification>,
    {
        let mut enabled = EnumMap::default();
        for ev in events {
            enabled[ev] = true;
        }
        Bell {
            out,
            events: enabled,
        }
    }
}

impl<W: Write> NotificationSink for Bell<W> {
    fn notify(&mut self, event: Notification) -> io::Result<()> {
        if self.events[event] {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A sink that remembers everything it's told
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Recorder(pub(crate) Vec<Notification>);

    impl NotificationSink for Recorder {
        fn notify(&mut self, event: Notification) -> io::Result<()> {
            self.0.push(event);
            Ok(())
        }
    }

    /// A sink that always fails, like a terminal that's gone away
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Broken;

    impl NotificationSink for Broken {
        fn notify(&mut self, _event: Notification) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "speaker unplugged"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Broken;
    use super::*;

    #[test]
    fn bell_rings_for_chosen_events() {
        let mut bell = Bell::with_writer(
            Vec::new(),
            [Notification::GameOver, Notification::AteBonus],
        );
        bell.notify(Notification::AteFood).unwrap();
        bell.notify(Notification::GameOver).unwrap();
        bell.notify(Notification::CrossedMilestone).unwrap();
        bell.notify(Notification::AteBonus).unwrap();
        assert_eq!(bell.out, b"\x07\x07");
    }

    #[test]
    fn silent_bell() {
        let mut bell = Bell::with_writer(Vec::new(), Vec::<Notification>::new());
        bell.notify(Notification::GameOver).unwrap();
        assert!(bell.out.is_empty());
    }

    #[test]
    fn deliver_swallows_failures() {
        let mut sink = Broken;
        deliver(&mut sink, Notification::GameOver);
    }

    #[test]
    fn serde_names() {
        let events: Vec<Notification> =
            serde_json::from_str(r#"["ate-food", "crossed-milestone", "beat-high-score"]"#)
                .unwrap();
        assert_eq!(
            events,
            [
                Notification::AteFood,
                Notification::CrossedMilestone,
                Notification::BeatHighScore
            ]
        );
    }
}
