//! Sound effects for game events

use blockfall::GameEvent;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    LineClear,
    GameOver,
}

impl Sfx {
    fn filename(&self) -> &'static str {
        match self {
            Sfx::LineClear => "pop.wav",
            Sfx::GameOver => "pop2.wav",
        }
    }

    /// Effect for a session event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::LinesCleared(_) => Sfx::LineClear,
            GameEvent::GameOver => Sfx::GameOver,
        }
    }
}

/// Audio manager handles all sound playback
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    assets_path: PathBuf,
    sfx_volume: f32,
}

impl AudioManager {
    /// Open the default output device. `None` when there is no device or no
    /// sound assets; the game runs silently then.
    pub fn new() -> Option<Self> {
        let Some(assets_path) = Self::find_assets_path() else {
            debug!("no sfx directory found, audio disabled");
            return None;
        };
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(e) => {
                warn!("no audio output: {}", e);
                return None;
            }
        };

        Some(Self {
            _stream: stream,
            stream_handle,
            assets_path,
            sfx_volume: 0.5,
        })
    }

    fn find_assets_path() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("assets")];
        if let Some(dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.join("assets"))) {
            paths.push(dir);
        }

        paths.into_iter().find(|p| p.join("sfx").is_dir())
    }

    /// Set SFX volume (0.0 to 1.0)
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play_sfx(&mut self, sfx: Sfx) {
        if self.sfx_volume <= 0.0 {
            return;
        }

        let path = self.assets_path.join("sfx").join(sfx.filename());
        let Ok(file) = File::open(&path) else {
            debug!("missing sound {}", path.display());
            return;
        };
        let Ok(decoder) = Decoder::new(BufReader::new(file)) else { return };
        let Ok(sink) = Sink::try_new(&self.stream_handle) else { return };

        sink.set_volume(self.sfx_volume);
        sink.append(decoder);
        sink.detach(); // Let it play and clean up automatically
    }
}
