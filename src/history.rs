//! Deinterleave / history (component G): copies incoming frames into
//! per-channel scratch buffers appended after retained history, and shifts
//! residual history left after each call.

use crate::sample::Sample;

/// Per-channel retained history plus the deinterleaving step that appends
/// new input frames to it.
pub struct History<S: Sample> {
    buffers: Vec<Vec<S>>,
    pub samples_avail: usize,
}

impl<S: Sample> History<S> {
    pub fn new(channels: usize) -> Self {
        Self {
            buffers: (0..channels).map(|_| Vec::new()).collect(),
            samples_avail: 0,
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffer(&self, channel: usize) -> &[S] {
        &self.buffers[channel][..self.samples_avail]
    }

    /// Grow every channel buffer so it can hold `frames` frames, without
    /// touching `samples_avail`.
    fn ensure_capacity(&mut self, frames: usize) {
        for buf in self.buffers.iter_mut() {
            if buf.len() < frames {
                buf.resize(frames, S::default());
            }
        }
    }

    /// Append `in_frames` frames of input (spec §4.G). `input` is `None`
    /// for silence (`in == null`); otherwise it is one interleaved buffer
    /// of `channels`-wide frames, or (when `interleaved` is false) one
    /// contiguous buffer per channel addressed via `channel_slice`.
    pub fn push_interleaved(&mut self, input: Option<&[S]>, in_frames: usize) {
        let channels = self.channels();
        self.ensure_capacity(self.samples_avail + in_frames);
        for c in 0..channels {
            let offset = self.samples_avail;
            match input {
                Some(data) => {
                    for i in 0..in_frames {
                        self.buffers[c][offset + i] = data[i * channels + c];
                    }
                }
                None => {
                    for i in 0..in_frames {
                        self.buffers[c][offset + i] = S::default();
                    }
                }
            }
        }
        self.samples_avail += in_frames;
    }

    /// Append `in_frames` frames from `channels` independent, already
    /// non-interleaved input buffers (or silence).
    pub fn push_noninterleaved(&mut self, input: Option<&[&[S]]>, in_frames: usize) {
        let channels = self.channels();
        self.ensure_capacity(self.samples_avail + in_frames);
        for c in 0..channels {
            let offset = self.samples_avail;
            match input {
                Some(data) => {
                    self.buffers[c][offset..offset + in_frames].copy_from_slice(&data[c][..in_frames]);
                }
                None => {
                    for i in 0..in_frames {
                        self.buffers[c][offset + i] = S::default();
                    }
                }
            }
        }
        self.samples_avail += in_frames;
    }

    /// Shift the retained history left by `consumed` frames so index 0 is
    /// again the oldest unconsumed sample; reduces `samples_avail`
    /// accordingly. A no-op if `consumed` is zero.
    pub fn consume(&mut self, consumed: usize) {
        let consumed = consumed.min(self.samples_avail);
        if consumed == 0 {
            return;
        }
        let remaining = self.samples_avail - consumed;
        for buf in self.buffers.iter_mut() {
            buf.copy_within(consumed..consumed + remaining, 0);
        }
        self.samples_avail = remaining;
    }

    /// Drop all retained history (used when more virtual frames were
    /// consumed than were physically available; spec §4.I "skip").
    pub fn drop_all(&mut self) {
        self.samples_avail = 0;
    }

    /// Reset to the post-construction invariant of spec §3 point 3: zero
    /// the first `half_taps` frames of every buffer and leave
    /// `samples_avail = half_taps - 1` (the off-by-one is the spec's own;
    /// see spec §4.I `reset`).
    pub fn reset(&mut self, half_taps: usize) {
        self.ensure_capacity(half_taps.max(1));
        for buf in self.buffers.iter_mut() {
            for slot in buf.iter_mut().take(half_taps) {
                *slot = S::default();
            }
        }
        self.samples_avail = half_taps.saturating_sub(1);
    }

    /// Shift existing history by `shift` frames (spec §4.H step 10,
    /// recentering on a tap-count change). Positive `shift` drops frames
    /// from the front (history got shorter); negative `shift` inserts
    /// `-shift` unspecified frames at the front (history got longer). Per
    /// spec §9 Open Question, the newly exposed region is left as
    /// whatever was already in the buffer rather than being zeroed or
    /// mirrored — a deliberate compatibility decision, not an oversight.
    pub fn shift(&mut self, shift: isize) {
        if shift == 0 {
            return;
        }
        if shift > 0 {
            self.consume(shift as usize);
        } else {
            let insert = (-shift) as usize;
            self.ensure_capacity(self.samples_avail + insert);
            for buf in self.buffers.iter_mut() {
                buf.copy_within(0..self.samples_avail, insert);
            }
            self.samples_avail += insert;
        }
    }
}
