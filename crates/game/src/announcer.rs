use log::trace;

use crate::media::SoundId;
use crate::ring::Ring;
use crate::services::{Attenuation, Audio, Channel, Emitter, SoundRequest};

pub const ANNOUNCER_QUEUE: usize = 32;

/// Minimum gap between two announcer lines, in milliseconds.
pub const ANNOUNCER_SPACING: i64 = 1500;

/// Spaces announcer lines out so bursts of cues stay intelligible.
#[derive(Debug, Clone, Default)]
pub struct Announcer {
    queue: Ring<Option<SoundId>, ANNOUNCER_QUEUE>,
    current: u64,
    delay: i64,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.current = 0;
    }

    /// Cues not yet released.
    pub fn pending(&self) -> usize {
        (self.queue.head() - self.current) as usize
    }

    pub fn delay(&self) -> i64 {
        self.delay
    }

    /// Plays `sound` now, or queues it behind earlier lines. A full queue
    /// overwrites its oldest unreleased cue.
    pub fn enqueue(
        &mut self,
        sound: Option<SoundId>,
        queued: bool,
        audio: &mut dyn Audio,
        volume: f32,
    ) {
        let Some(sound) = sound else {
            return;
        };

        if !queued {
            play(audio, sound, volume);
            self.delay = ANNOUNCER_SPACING;
            return;
        }

        self.queue.push(Some(sound));
        self.current = self.current.max(self.queue.tail());
    }

    /// Advances the spacing timer by `elapsed` ms and releases at most one
    /// queued cue.
    pub fn release(&mut self, elapsed: i64, audio: &mut dyn Audio, volume: f32) -> Option<SoundId> {
        self.delay -= elapsed;
        if self.delay > 0 {
            return None;
        }

        if self.current >= self.queue.head() {
            self.delay = 0;
            return None;
        }

        let sound = self.queue.get(self.current).copied().flatten();
        self.current += 1;
        self.delay = ANNOUNCER_SPACING;

        if let Some(sound) = sound {
            trace!("announcer releases {sound:?}, {} pending", self.pending());
            play(audio, sound, volume);
        }
        sound
    }
}

fn play(audio: &mut dyn Audio, sound: SoundId, volume: f32) {
    audio.play(SoundRequest {
        sound,
        emitter: Emitter::Local,
        channel: Channel::Announcer,
        volume,
        attenuation: Attenuation::None,
        immediate: false,
    });
}
