//! Audio system using the Web Audio API
//!
//! Procedurally generated sound effects and background music - no external
//! files needed. The sim never calls in here directly; it emits
//! [`GameEvent`]s and the host forwards them. When no `AudioContext` can be
//! created the whole manager degrades to a no-op and the game plays silent.

pub mod score;
pub mod sequencer;

use crate::settings::Settings;
use crate::sim::GameEvent;

use crate::consts::MUSIC_TEMPO_BPM;
use sequencer::MusicSequencer;

#[cfg(target_arch = "wasm32")]
use crate::consts::MUSIC_LOOKAHEAD_SECS;
#[cfg(target_arch = "wasm32")]
use score::{
    COLLECT_EFFECT, EffectSpec, JUMP_EFFECT, STEP_EFFECT, WIN_CHORD_FREQS, WIN_CHORD_GAIN_SCALE,
    WIN_EFFECT, Waveform,
};
#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

/// Audio manager: one-shot effect tones plus the looping background score.
///
/// Music and SFX are routed through separate gain buses under a master bus,
/// so either side can be silenced without touching the other.
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    #[cfg(target_arch = "wasm32")]
    music_bus: Option<GainNode>,
    #[cfg(target_arch = "wasm32")]
    sfx_bus: Option<GainNode>,
    /// Oscillators belonging to the background score that may still be
    /// sounding, with their scheduled end times. Kept so disabling music can
    /// cancel them immediately.
    #[cfg(target_arch = "wasm32")]
    live_music: Vec<(OscillatorNode, f64)>,
    sequencer: MusicSequencer,
    music_enabled: bool,
    sfx_enabled: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            // May fail outside a secure context; the game carries on silent
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            let buses = ctx.as_ref().and_then(|c| build_buses(c, settings));
            let (music_bus, sfx_bus) = match buses {
                Some((m, s)) => (Some(m), Some(s)),
                None => (None, None),
            };
            Self {
                ctx,
                music_bus,
                sfx_bus,
                live_music: Vec::new(),
                sequencer: MusicSequencer::new(MUSIC_TEMPO_BPM),
                music_enabled: settings.music_enabled,
                sfx_enabled: settings.sfx_enabled,
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                sequencer: MusicSequencer::new(MUSIC_TEMPO_BPM),
                music_enabled: settings.music_enabled,
                sfx_enabled: settings.sfx_enabled,
            }
        }
    }

    /// Resume a suspended context (browsers require a user gesture first)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn sfx_enabled(&self) -> bool {
        self.sfx_enabled
    }

    /// Enable or disable the background score. Disabling stops the schedule
    /// and silences every note of it that is still sounding; one-shot
    /// effects are unaffected. Re-enabling restarts the loop from its start
    /// on the next pump.
    pub fn set_music_enabled(&mut self, on: bool) {
        self.music_enabled = on;
        if !on {
            self.sequencer.stop();
            #[cfg(target_arch = "wasm32")]
            for (osc, _) in self.live_music.drain(..) {
                let _ = osc.stop();
            }
        }
        log::info!("Music {}", if on { "on" } else { "off" });
    }

    /// Enable or disable one-shot effects. The background score is
    /// unaffected either way.
    pub fn set_sfx_enabled(&mut self, on: bool) {
        self.sfx_enabled = on;
        log::info!("SFX {}", if on { "on" } else { "off" });
    }

    /// Map an effect event to its tone(s). Disabled SFX drops the event
    /// silently; a missing context drops everything silently.
    pub fn handle_event(&mut self, event: GameEvent) {
        if !self.sfx_enabled {
            return;
        }
        log::debug!("effect event: {event:?}");
        #[cfg(target_arch = "wasm32")]
        match event {
            GameEvent::Jump => self.play_effect(&JUMP_EFFECT, None, 1.0),
            GameEvent::Step => self.play_effect(&STEP_EFFECT, None, 1.0),
            GameEvent::Collect => self.play_effect(&COLLECT_EFFECT, None, 1.0),
            GameEvent::Win => {
                // Chord fanfare: all three tones start together
                for freq in WIN_CHORD_FREQS {
                    self.play_effect(&WIN_EFFECT, Some(freq), WIN_CHORD_GAIN_SCALE);
                }
            }
        }
    }

    /// Called once per host frame. Reads the audio clock and realizes any
    /// background notes falling inside the lookahead window. Simulation
    /// ticks never enter into the timing.
    pub fn pump(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(ctx) = &self.ctx else { return };
            let now = ctx.current_time();
            self.live_music.retain(|(_, end)| *end > now);

            if !self.music_enabled || ctx.state() != AudioContextState::Running {
                return;
            }
            if !self.sequencer.is_running() {
                self.sequencer.start(now);
            }

            let mut due = Vec::new();
            self.sequencer.pump(now, MUSIC_LOOKAHEAD_SECS, &mut due);
            for note in due {
                self.play_music_note(&note);
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn play_music_note(&mut self, note: &sequencer::ScheduledNote) {
        let Some(ctx) = &self.ctx else { return };
        let Some(bus) = &self.music_bus else { return };
        let Some((osc, gain)) = create_osc(ctx, bus, note.freq, osc_type(note.waveform)) else {
            return;
        };
        let t = note.start;
        let d = note.duration;

        // Soft attack, gentle fade through the tail
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(note.gain, t + 0.05).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(note.gain * 0.7, t + d * 0.8)
            .ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + d).ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + d).ok();
        self.live_music.push((osc, t + d));
    }

    /// Play a one-shot tone on the SFX bus. `freq_override` pins every
    /// envelope breakpoint to one frequency (used for chord voices);
    /// `gain_scale` scales the envelope gains.
    #[cfg(target_arch = "wasm32")]
    fn play_effect(&self, spec: &EffectSpec, freq_override: Option<f32>, gain_scale: f32) {
        let Some(ctx) = &self.ctx else { return };
        let Some(bus) = &self.sfx_bus else { return };
        let base = freq_override.unwrap_or(spec.base_freq);
        let Some((osc, gain)) = create_osc(ctx, bus, base, osc_type(spec.waveform)) else {
            return;
        };
        let t = ctx.current_time();

        if spec.envelope.is_empty() {
            // No envelope: exponential decay from the initial gain
            gain.gain().set_value_at_time(0.3 * gain_scale, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + f64::from(spec.duration))
                .ok();
        } else {
            for p in spec.envelope {
                let at = t + f64::from(p.t);
                let freq = freq_override.or(p.freq).unwrap_or(spec.base_freq);
                osc.frequency().set_value_at_time(freq, at).ok();
                gain.gain().set_value_at_time(p.gain * gain_scale, at).ok();
            }
        }

        osc.start().ok();
        osc.stop_with_when(t + f64::from(spec.duration)).ok();
    }
}

/// Gain topology: master feeds the destination; music and SFX buses feed
/// the master, so either side can be muted independently.
#[cfg(target_arch = "wasm32")]
fn build_buses(ctx: &AudioContext, settings: &Settings) -> Option<(GainNode, GainNode)> {
    let master = ctx.create_gain().ok()?;
    master.gain().set_value(settings.master_volume);
    master.connect_with_audio_node(&ctx.destination()).ok()?;

    let music = ctx.create_gain().ok()?;
    music.gain().set_value(settings.music_volume);
    music.connect_with_audio_node(&master).ok()?;

    let sfx = ctx.create_gain().ok()?;
    sfx.gain().set_value(settings.sfx_volume);
    sfx.connect_with_audio_node(&master).ok()?;

    Some((music, sfx))
}

#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    bus: &GainNode,
    freq: f32,
    ty: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(ty);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(bus).ok()?;

    Some((osc, gain))
}

#[cfg(target_arch = "wasm32")]
fn osc_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_are_independent() {
        let settings = Settings::default();
        let mut audio = AudioManager::new(&settings);
        assert!(audio.music_enabled());
        assert!(audio.sfx_enabled());

        audio.set_music_enabled(false);
        assert!(!audio.music_enabled());
        assert!(audio.sfx_enabled());
        assert!(!audio.sequencer.is_running());

        audio.set_sfx_enabled(false);
        audio.set_music_enabled(true);
        assert!(audio.music_enabled());
        assert!(!audio.sfx_enabled());
    }

    #[test]
    fn test_disabled_sfx_drops_events() {
        // Degraded manager (no context off-web) must accept events quietly
        let mut audio = AudioManager::new(&Settings::default());
        audio.set_sfx_enabled(false);
        audio.handle_event(GameEvent::Jump);
        audio.handle_event(GameEvent::Win);
        audio.pump();
    }
}
