use meetlens_core::MediaElement;

/// Terminal stand-in for a media element: tracks where playback would be.
#[derive(Debug)]
pub struct PlaybackCursor {
    source: String,
    position: f64,
    playing: bool,
}

impl PlaybackCursor {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            position: 0.0,
            playing: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl MediaElement for PlaybackCursor {
    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, secs: f64) {
        self.position = secs;
    }

    fn play(&mut self) {
        self.playing = true;
    }
}
