//! Background music scheduling
//!
//! The melody and bass lines are two independent back-to-back note schedules
//! driven by the audio-domain clock the caller passes in. The sim tick
//! counter never appears here: the host pumps this once per frame, but all
//! timing decisions come from the clock value.

use super::score::{
    BASS, BASS_GAIN, BASS_STRETCH, BASS_WAVEFORM, MELODY, MELODY_GAIN, MELODY_WAVEFORM, Note,
    Waveform,
};

/// A note the backend should realize: absolute start time on the audio
/// clock, sounding duration in seconds, and voice parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledNote {
    pub freq: f32,
    pub start: f64,
    pub duration: f64,
    pub waveform: Waveform,
    pub gain: f32,
}

/// Cursor over one looping note line
#[derive(Debug, Clone)]
struct LineCursor {
    notes: &'static [Note],
    waveform: Waveform,
    gain: f32,
    /// Sounding-duration multiplier on the nominal beat count
    stretch: f32,
    index: usize,
    /// Absolute start time of the next note, once the line is running
    next_at: Option<f64>,
}

impl LineCursor {
    fn new(notes: &'static [Note], waveform: Waveform, gain: f32, stretch: f32) -> Self {
        Self {
            notes,
            waveform,
            gain,
            stretch,
            index: 0,
            next_at: None,
        }
    }

    fn start(&mut self, now: f64) {
        self.index = 0;
        self.next_at = Some(now);
    }

    fn stop(&mut self) {
        self.next_at = None;
    }

    /// Emit every note whose start falls inside the lookahead window,
    /// advancing back-to-back and wrapping at the end of the line.
    fn pump(&mut self, now: f64, lookahead: f64, beat: f64, out: &mut Vec<ScheduledNote>) {
        while let Some(start) = self.next_at {
            if start > now + lookahead {
                break;
            }
            let note = self.notes[self.index];
            let duration = f64::from(note.beats * self.stretch) * beat;
            out.push(ScheduledNote {
                freq: note.pitch.frequency(),
                start,
                duration,
                waveform: self.waveform,
                gain: self.gain,
            });
            self.index = (self.index + 1) % self.notes.len();
            self.next_at = Some(start + duration);
        }
    }
}

/// Lookahead scheduler for the looping melody and bass lines
#[derive(Debug, Clone)]
pub struct MusicSequencer {
    /// Seconds per beat
    beat: f64,
    melody: LineCursor,
    bass: LineCursor,
    running: bool,
}

impl MusicSequencer {
    pub fn new(tempo_bpm: f32) -> Self {
        Self {
            beat: 60.0 / f64::from(tempo_bpm),
            melody: LineCursor::new(MELODY, MELODY_WAVEFORM, MELODY_GAIN, 1.0),
            bass: LineCursor::new(BASS, BASS_WAVEFORM, BASS_GAIN, BASS_STRETCH),
            running: false,
        }
    }

    /// Begin (or re-begin) the loop at `now`. Always restarts both lines
    /// from their first note; there is no pause/resume position.
    pub fn start(&mut self, now: f64) {
        self.melody.start(now);
        self.bass.start(now);
        self.running = true;
    }

    /// Stop scheduling. Pending (not yet emitted) notes are simply dropped;
    /// silencing notes already handed to the backend is the backend's job.
    pub fn stop(&mut self) {
        self.melody.stop();
        self.bass.stop();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Emit every note from either line that starts within `lookahead`
    /// seconds of `now`.
    pub fn pump(&mut self, now: f64, lookahead: f64, out: &mut Vec<ScheduledNote>) {
        if !self.running {
            return;
        }
        self.melody.pump(now, lookahead, self.beat, out);
        self.bass.pump(now, lookahead, self.beat, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MUSIC_TEMPO_BPM;

    fn pump_collect(seq: &mut MusicSequencer, now: f64, lookahead: f64) -> Vec<ScheduledNote> {
        let mut out = Vec::new();
        seq.pump(now, lookahead, &mut out);
        out
    }

    #[test]
    fn test_not_running_emits_nothing() {
        let mut seq = MusicSequencer::new(MUSIC_TEMPO_BPM);
        assert!(pump_collect(&mut seq, 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_first_pump_schedules_both_lines() {
        let mut seq = MusicSequencer::new(MUSIC_TEMPO_BPM);
        seq.start(1.0);
        let notes = pump_collect(&mut seq, 1.0, 0.2);
        // Both line openers start exactly at the loop start
        assert_eq!(notes.iter().filter(|n| n.start == 1.0).count(), 2);
        assert!(notes.iter().any(|n| n.waveform == Waveform::Triangle));
        assert!(notes.iter().any(|n| n.waveform == Waveform::Sawtooth));
    }

    #[test]
    fn test_melody_notes_are_back_to_back() {
        let mut seq = MusicSequencer::new(MUSIC_TEMPO_BPM);
        seq.start(0.0);
        // Window over one full melody pass (8 beats = 4s at 120 BPM)
        let notes = pump_collect(&mut seq, 0.0, 4.1);
        let melody: Vec<_> = notes
            .iter()
            .filter(|n| n.waveform == Waveform::Triangle)
            .collect();
        assert!(melody.len() > MELODY.len());
        for pair in melody.windows(2) {
            assert!((pair[0].start + pair[0].duration - pair[1].start).abs() < 1e-9);
        }
    }

    #[test]
    fn test_loop_wraps_to_first_note() {
        let mut seq = MusicSequencer::new(MUSIC_TEMPO_BPM);
        seq.start(0.0);
        let notes = pump_collect(&mut seq, 0.0, 4.5);
        let melody: Vec<_> = notes
            .iter()
            .filter(|n| n.waveform == Waveform::Triangle)
            .collect();
        // One full pass is 4s; the note after it repeats the opener
        let wrapped = &melody[MELODY.len()];
        assert!((wrapped.start - 4.0).abs() < 1e-9);
        assert_eq!(wrapped.freq, MELODY[0].pitch.frequency());
    }

    #[test]
    fn test_bass_sounds_at_double_duration() {
        let mut seq = MusicSequencer::new(MUSIC_TEMPO_BPM);
        seq.start(0.0);
        let notes = pump_collect(&mut seq, 0.0, 0.2);
        let bass = notes
            .iter()
            .find(|n| n.waveform == Waveform::Sawtooth)
            .unwrap();
        // 1 nominal beat at 120 BPM = 0.5s, stretched x2
        assert!((bass.duration - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pump_is_incremental() {
        let mut seq = MusicSequencer::new(MUSIC_TEMPO_BPM);
        seq.start(0.0);
        let first = pump_collect(&mut seq, 0.0, 0.2);
        // Same window again: everything already emitted
        assert!(pump_collect(&mut seq, 0.0, 0.2).is_empty());
        // Advancing the clock emits the next batch exactly once
        let second = pump_collect(&mut seq, 0.5, 0.2);
        assert!(!second.is_empty());
        for n in &second {
            assert!(!first.contains(n));
        }
    }

    #[test]
    fn test_restart_resumes_from_the_top() {
        let mut seq = MusicSequencer::new(MUSIC_TEMPO_BPM);
        seq.start(0.0);
        let _ = pump_collect(&mut seq, 0.0, 3.0);
        seq.stop();
        assert!(pump_collect(&mut seq, 3.0, 1.0).is_empty());

        seq.start(10.0);
        let notes = pump_collect(&mut seq, 10.0, 0.2);
        let melody = notes
            .iter()
            .find(|n| n.waveform == Waveform::Triangle)
            .unwrap();
        assert_eq!(melody.freq, MELODY[0].pitch.frequency());
        assert_eq!(melody.start, 10.0);
    }
}
