//=========================================================================
// Audio
//=========================================================================
//
// Contract between scenes and the audio backend.
//
// Scenes request playback by sound name on one of two channels; mixing,
// channel allocation and decoding stay with the backend that implements
// `AudioMixer`. `NullMixer` is installed until the manager is initialized.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Channel =============================================================

/// Logical playback channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Looping background music.
    Music,

    /// One-shot sound effects.
    Effects,
}

//=== AudioMixer ==========================================================

/// Audio backend operations available to scenes.
pub trait AudioMixer {
    /// Starts `sound` on `channel`, replacing whatever it was playing.
    fn play(&mut self, channel: Channel, sound: &str);

    /// Stops `channel`.
    fn stop(&mut self, channel: Channel);

    /// Sets the global volume, clamped to `0.0..=1.0` by implementations.
    fn set_volume(&mut self, volume: f32);

    /// Current global volume.
    fn volume(&self) -> f32;
}

//=== NullMixer ===========================================================

/// Mixer that plays nothing and only tracks volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullMixer {
    volume: f32,
}

impl NullMixer {
    pub fn new() -> Self {
        Self { volume: 1.0 }
    }
}

impl Default for NullMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer for NullMixer {
    fn play(&mut self, channel: Channel, sound: &str) {
        trace!(target: "audio", "Null mixer ignoring {:?} on {:?}", sound, channel);
    }

    fn stop(&mut self, _channel: Channel) {}

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_mixer_starts_at_full_volume() {
        assert_eq!(NullMixer::new().volume(), 1.0);
    }

    #[test]
    fn null_mixer_clamps_volume() {
        let mut mixer = NullMixer::new();

        mixer.set_volume(0.25);
        assert_eq!(mixer.volume(), 0.25);

        mixer.set_volume(4.0);
        assert_eq!(mixer.volume(), 1.0);

        mixer.set_volume(-1.0);
        assert_eq!(mixer.volume(), 0.0);
    }

    #[test]
    fn null_mixer_is_object_safe() {
        let mut mixer: Box<dyn AudioMixer> = Box::new(NullMixer::new());
        mixer.play(Channel::Music, "theme");
        mixer.stop(Channel::Music);
        assert_eq!(mixer.volume(), 1.0);
    }
}
