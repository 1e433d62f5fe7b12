//! Note tables, envelopes, and effect tone definitions
//!
//! Everything here is plain data so the sequencer and tests can run without
//! an audio backend.

/// Oscillator waveforms used by the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One breakpoint of a tone envelope: offset from note start (seconds),
/// target gain, and an optional frequency retarget. Offsets within an
/// envelope are strictly increasing.
#[derive(Debug, Clone, Copy)]
pub struct EnvPoint {
    pub t: f32,
    pub gain: f32,
    pub freq: Option<f32>,
}

pub type Envelope = &'static [EnvPoint];

/// Pitches used by the background score, resolved to equal-temperament
/// frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    C2,
    G2,
    A2,
    F2,
    G3,
    A3,
    C4,
    D4,
    E4,
    F4,
}

impl Pitch {
    pub fn frequency(self) -> f32 {
        match self {
            Pitch::C2 => 65.41,
            Pitch::G2 => 98.00,
            Pitch::A2 => 110.00,
            Pitch::F2 => 87.31,
            Pitch::G3 => 196.00,
            Pitch::A3 => 220.00,
            Pitch::C4 => 261.63,
            Pitch::D4 => 293.66,
            Pitch::E4 => 329.63,
            Pitch::F4 => 349.23,
        }
    }
}

/// A note of a background line: pitch plus nominal duration in beats
#[derive(Debug, Clone, Copy)]
pub struct Note {
    pub pitch: Pitch,
    pub beats: f32,
}

const fn note(pitch: Pitch, beats: f32) -> Note {
    Note { pitch, beats }
}

/// The looping island melody (triangle voice)
pub const MELODY: &[Note] = &[
    note(Pitch::C4, 0.5),
    note(Pitch::G3, 0.25),
    note(Pitch::C4, 0.25),
    note(Pitch::E4, 0.5),
    note(Pitch::D4, 0.5),
    note(Pitch::C4, 0.75),
    note(Pitch::G3, 0.25),
    note(Pitch::A3, 0.5),
    note(Pitch::G3, 0.5),
    note(Pitch::C4, 0.5),
    note(Pitch::G3, 0.25),
    note(Pitch::C4, 0.25),
    note(Pitch::E4, 0.5),
    note(Pitch::F4, 0.5),
    note(Pitch::E4, 0.5),
    note(Pitch::D4, 0.5),
    note(Pitch::C4, 1.0),
];

/// The bass line (sawtooth voice). Bass notes sound at twice their nominal
/// duration, half-speed under the melody.
pub const BASS: &[Note] = &[
    note(Pitch::C2, 1.0),
    note(Pitch::G2, 1.0),
    note(Pitch::A2, 1.0),
    note(Pitch::F2, 1.0),
    note(Pitch::C2, 1.0),
    note(Pitch::G2, 1.0),
    note(Pitch::F2, 1.0),
    note(Pitch::C2, 1.0),
];

pub const MELODY_WAVEFORM: Waveform = Waveform::Triangle;
pub const MELODY_GAIN: f32 = 0.10;
pub const BASS_WAVEFORM: Waveform = Waveform::Sawtooth;
pub const BASS_GAIN: f32 = 0.08;
pub const BASS_STRETCH: f32 = 2.0;

/// A one-shot effect tone: base frequency, total sounding time, waveform,
/// and an envelope. An empty envelope means "exponential decay from the
/// initial gain to near-silence over the duration".
#[derive(Debug, Clone, Copy)]
pub struct EffectSpec {
    pub base_freq: f32,
    pub duration: f32,
    pub waveform: Waveform,
    pub envelope: Envelope,
}

const fn point(t: f32, gain: f32, freq: f32) -> EnvPoint {
    EnvPoint {
        t,
        gain,
        freq: Some(freq),
    }
}

/// Jump: quick ascending sine chirp
pub const JUMP_EFFECT: EffectSpec = EffectSpec {
    base_freq: 300.0,
    duration: 0.15,
    waveform: Waveform::Sine,
    envelope: &[
        point(0.0, 0.4, 300.0),
        point(0.05, 0.3, 500.0),
        point(0.1, 0.1, 400.0),
        point(0.15, 0.0, 200.0),
    ],
};

/// Collect: climbing square-wave chime
pub const COLLECT_EFFECT: EffectSpec = EffectSpec {
    base_freq: 600.0,
    duration: 0.2,
    waveform: Waveform::Square,
    envelope: &[
        point(0.0, 0.3, 600.0),
        point(0.05, 0.4, 800.0),
        point(0.1, 0.3, 1000.0),
        point(0.15, 0.1, 1200.0),
        point(0.2, 0.0, 1000.0),
    ],
};

/// Footstep: soft low thud
pub const STEP_EFFECT: EffectSpec = EffectSpec {
    base_freq: 150.0,
    duration: 0.08,
    waveform: Waveform::Square,
    envelope: &[
        point(0.0, 0.1, 150.0),
        point(0.02, 0.15, 120.0),
        point(0.05, 0.05, 100.0),
        point(0.08, 0.0, 80.0),
    ],
};

/// Win fanfare: a sustained C-major chord, one tone per frequency, all
/// started together. Per-tone gain is scaled down so the chord sums to
/// roughly a single voice.
pub const WIN_CHORD_FREQS: [f32; 3] = [523.0, 659.0, 784.0];
pub const WIN_CHORD_GAIN_SCALE: f32 = 0.3;

pub const WIN_EFFECT: EffectSpec = EffectSpec {
    base_freq: 523.0,
    duration: 1.0,
    waveform: Waveform::Triangle,
    envelope: &[
        EnvPoint {
            t: 0.0,
            gain: 0.4,
            freq: None,
        },
        EnvPoint {
            t: 0.2,
            gain: 0.5,
            freq: None,
        },
        EnvPoint {
            t: 0.8,
            gain: 0.3,
            freq: None,
        },
        EnvPoint {
            t: 1.0,
            gain: 0.0,
            freq: None,
        },
    ],
};

/// Envelope offsets must be strictly increasing for the breakpoints to be
/// applied in order.
pub fn envelope_is_ordered(env: Envelope) -> bool {
    env.windows(2).all(|w| w[0].t < w[1].t)
}
