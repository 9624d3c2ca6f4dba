//! Chapter timestamp parsing and seeking.
//!
//! Chapter timestamps arrive as free-form strings: `HH:MM:SS`, `MM:SS` or a
//! bare number of seconds. [`parse_timestamp`] turns them into a
//! [`SeekTarget`] and [`seek`] applies it to anything implementing
//! [`MediaElement`].

/// Result of parsing a chapter timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekTarget {
    /// Offset from the start of the media, in seconds.
    Offset(f64),
    Unparseable,
}

impl SeekTarget {
    pub fn offset(self) -> Option<f64> {
        match self {
            SeekTarget::Offset(secs) => Some(secs),
            SeekTarget::Unparseable => None,
        }
    }
}

/// A player whose position can be moved.
pub trait MediaElement {
    fn position(&self) -> f64;
    fn set_position(&mut self, secs: f64);
    fn play(&mut self);
}

pub fn parse_timestamp(raw: &str) -> SeekTarget {
    let raw = raw.trim();

    let secs = if raw.contains(':') {
        let parts = raw
            .split(':')
            .map(parse_part)
            .collect::<Option<Vec<f64>>>();

        match parts.as_deref() {
            Some([h, m, s]) => h * 3600.0 + m * 60.0 + s,
            Some([m, s]) => m * 60.0 + s,
            _ => return SeekTarget::Unparseable,
        }
    } else {
        match parse_part(raw) {
            Some(secs) => secs,
            None => return SeekTarget::Unparseable,
        }
    };

    if secs.is_finite() && secs >= 0.0 {
        SeekTarget::Offset(secs)
    } else {
        SeekTarget::Unparseable
    }
}

fn parse_part(part: &str) -> Option<f64> {
    let value = part.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Move `element` to `timestamp` and resume playback.
///
/// Unparseable timestamps leave the element untouched and return `false`.
pub fn seek<M: MediaElement + ?Sized>(element: &mut M, timestamp: &str) -> bool {
    match parse_timestamp(timestamp) {
        SeekTarget::Offset(secs) => {
            element.set_position(secs);
            element.play();
            true
        }
        SeekTarget::Unparseable => {
            tracing::debug!(timestamp, "ignoring unparseable chapter timestamp");
            false
        }
    }
}
