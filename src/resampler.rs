//! Streaming façade (component I): the public `Resampler` type and its
//! public operations — `resample`, `get_out_frames`, `get_in_frames`,
//! `reset`, `update`.

use crate::design::{self, ResolvedDesign};
use crate::error::ResampleError;
use crate::history::History;
use crate::kernel;
use crate::method::{FilterInterpolation, FilterMode, Method};
use crate::options::ResampleOptions;
use crate::phase::PhaseState;
use crate::sample::Sample;
use crate::taps::{FullTaps, InterpolatedTaps, TapDesign};

/// One call's worth of input samples.
pub enum SampleInput<'a, S: Sample> {
    /// `channels`-interleaved samples, `in_frames` frames long.
    Interleaved(&'a [S]),
    /// One contiguous buffer per channel, each `in_frames` samples long.
    Planar(&'a [&'a [S]]),
    /// Push `in_frames` of silence (the `in == null` case of spec §6).
    Silence,
}

/// One call's worth of output storage.
pub enum SampleOutput<'a, S: Sample> {
    Interleaved(&'a mut [S]),
    Planar(&'a mut [&'a mut [S]]),
}

/// A streaming polyphase FIR sample-rate converter, generic over the PCM
/// sample format `S` (spec §3's `format` attribute becomes this type
/// parameter — see DESIGN.md for why that's a better fit for Rust than a
/// runtime format tag wrapping four independent inner engines).
pub struct Resampler<S: Sample> {
    method: Method,
    options: ResampleOptions,
    channels: usize,
    non_interleaved: bool,
    design: ResolvedDesign,
    full: Option<FullTaps<S>>,
    interpolated: Option<InterpolatedTaps<S>>,
    history: History<S>,
    phase: PhaseState,
    skip: u64,
}

impl<S: Sample> Resampler<S> {
    /// Construct a new resampler (spec §3 "Lifecycle").
    pub fn new(
        method: Method,
        non_interleaved: bool,
        channels: usize,
        in_rate: u32,
        out_rate: u32,
        options: ResampleOptions,
    ) -> Result<Self, ResampleError> {
        if channels == 0 {
            return Err(ResampleError::InvalidChannelCount { channels });
        }
        let design = design::design(method, &options, in_rate, out_rate, 0, 0)?;
        let mut resampler = Self {
            method,
            options,
            channels,
            non_interleaved,
            full: None,
            interpolated: None,
            history: History::new(channels),
            phase: PhaseState {
                samp_index: 0,
                samp_phase: design.samp_phase,
            },
            skip: 0,
            design,
        };
        resampler.rebuild_tables();
        resampler.history.reset(resampler.design.n_taps / 2);
        Ok(resampler)
    }

    fn tap_design(&self) -> TapDesign {
        Self::tap_design_for(&self.design)
    }

    fn tap_design_for(design: &ResolvedDesign) -> TapDesign {
        TapDesign {
            method: design.method,
            n_taps: design.n_taps,
            cutoff: design.cutoff,
            cubic_b: design.cubic_b,
            cubic_c: design.cubic_c,
            kaiser_beta: design.kaiser_beta,
        }
    }

    fn rebuild_tables(&mut self) {
        let tap_design = self.tap_design();
        match self.design.filter_mode {
            FilterMode::Full | FilterMode::Auto => {
                let mut full = self.full.take().unwrap_or_default();
                full.ensure(&tap_design, self.design.out_rate);
                self.full = Some(full);
                self.interpolated = None;
            }
            FilterMode::Interpolated => {
                let mut interp = self.interpolated.take().unwrap_or_default();
                interp.build(&tap_design, self.design.oversample, self.design.filter_interpolation);
                self.interpolated = Some(interp);
                self.full = None;
            }
        }
    }

    /// Reconfigure rates and/or options (spec §4.H). On failure, the
    /// previous configuration is left untouched.
    pub fn update(&mut self, in_rate: i64, out_rate: i64, options: ResampleOptions) -> Result<(), ResampleError> {
        let effective_in = if in_rate <= 0 { self.design.in_rate } else { in_rate as u32 };
        let effective_out = if out_rate <= 0 { self.design.out_rate } else { out_rate as u32 };

        let new_design = design::design(
            self.method,
            &options,
            effective_in,
            effective_out,
            self.design.out_rate,
            self.phase.samp_phase,
        )?;

        let old_n_taps = self.design.n_taps as isize;
        let new_n_taps = new_design.n_taps as isize;
        let shift = (new_n_taps - old_n_taps) / 2;

        self.options = options;
        self.design = new_design;
        self.phase.samp_phase = self.design.samp_phase;
        self.rebuild_tables();
        if old_n_taps > 0 {
            self.history.shift(shift);
        }
        Ok(())
    }

    /// Maximum output latency in input frames (spec §4.I).
    pub fn get_max_latency(&self) -> usize {
        self.design.n_taps / 2
    }

    /// How many output frames a call with `in` additional input frames
    /// would be able to produce right now (spec §4.I).
    pub fn get_out_frames(&self, in_frames: usize) -> usize {
        let need = self.design.n_taps as u64 + self.phase.samp_index + self.skip;
        let avail = self.history.samples_avail as u64 + in_frames as u64;
        if avail < need {
            return 0;
        }
        let numerator =
            (avail - need) as i64 * self.design.out_rate as i64 - self.phase.samp_phase as i64;
        if numerator < 0 {
            return 0;
        }
        (numerator / self.design.in_rate as i64 + 1).max(0) as usize
    }

    /// How many input frames are needed to produce `out` output frames
    /// (spec §4.I).
    pub fn get_in_frames(&self, out_frames: usize) -> u64 {
        let out_frames = out_frames as u64;
        (self.phase.samp_phase as u64 + out_frames * self.design.samp_frac as u64)
            / self.design.out_rate as u64
            + out_frames * self.design.samp_inc
    }

    /// Reset to the post-construction state (spec §4.I).
    pub fn reset(&mut self) {
        self.history.reset(self.design.n_taps / 2);
        self.phase.samp_index = 0;
        self.skip = 0;
    }

    fn max_producible(&self) -> usize {
        self.get_out_frames(0)
    }

    /// Resample `in_frames` of `input` into up to `out_frames` of `output`.
    /// Returns the number of output frames actually written, which equals
    /// `out_frames` whenever the caller pre-checked
    /// `get_out_frames(in_frames) >= out_frames` per spec §6's calling
    /// contract; otherwise this never panics or reads/writes out of bounds,
    /// it simply writes fewer frames.
    pub fn resample(
        &mut self,
        input: SampleInput<'_, S>,
        in_frames: usize,
        mut output: SampleOutput<'_, S>,
        out_frames: usize,
    ) -> usize {
        if self.skip >= in_frames as u64 {
            self.skip -= in_frames as u64;
            return 0;
        }
        self.phase.samp_index += self.skip;
        self.skip = 0;

        match input {
            SampleInput::Interleaved(data) => self.history.push_interleaved(Some(data), in_frames),
            SampleInput::Planar(data) => self.history.push_noninterleaved(Some(data), in_frames),
            SampleInput::Silence => {
                if self.non_interleaved {
                    self.history.push_noninterleaved(None, in_frames);
                } else {
                    self.history.push_interleaved(None, in_frames);
                }
            }
        }

        let n_taps = self.design.n_taps as u64;
        if (self.history.samples_avail as u64) < n_taps + self.phase.samp_index {
            return 0;
        }

        let out_frames = out_frames.min(self.max_producible());
        let samp_index_initial = self.phase.samp_index;

        for frame in 0..out_frames {
            for channel in 0..self.channels {
                let start = self.phase.samp_index as usize;
                let n_taps = self.design.n_taps;
                let buf = self.history.buffer(channel);
                let slice = &buf[start..start + n_taps];
                let value = Self::convolve(
                    &self.design,
                    &mut self.full,
                    &self.interpolated,
                    &self.phase,
                    slice,
                );
                write_output(&mut output, frame, channel, value, self.channels);
            }
            self.phase
                .advance(self.design.samp_inc, self.design.samp_frac, self.design.out_rate);
        }

        let consumed = self.phase.samp_index - samp_index_initial;
        self.phase.samp_index = 0;
        let old_avail = self.history.samples_avail as u64;
        if consumed > old_avail {
            self.history.drop_all();
            self.skip = consumed - old_avail;
        } else {
            self.history.consume(consumed as usize);
        }

        out_frames
    }

    #[inline]
    fn convolve(
        design: &ResolvedDesign,
        full: &mut Option<FullTaps<S>>,
        interpolated: &Option<InterpolatedTaps<S>>,
        phase: &PhaseState,
        slice: &[S],
    ) -> S {
        let n_taps = design.n_taps;
        match design.filter_mode {
            FilterMode::Full | FilterMode::Auto => {
                let tap_design = Self::tap_design_for(design);
                let row = full
                    .as_mut()
                    .expect("FULL mode table must be built")
                    .row(phase.samp_phase as usize, &tap_design, design.out_rate);
                kernel::kernel_none::<S>(slice, 1, row, n_taps)
            }
            FilterMode::Interpolated => {
                let result = interpolated
                    .as_ref()
                    .expect("INTERPOLATED mode table must be built")
                    .lookup(phase.samp_phase, design.out_rate);
                match design.filter_interpolation {
                    FilterInterpolation::None => kernel::kernel_none::<S>(slice, 1, result.row, n_taps),
                    FilterInterpolation::Linear => kernel::kernel_linear::<S>(slice, 1, &result, n_taps),
                    FilterInterpolation::Cubic => kernel::kernel_cubic::<S>(slice, 1, &result, n_taps),
                }
            }
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn in_rate(&self) -> u32 {
        self.design.in_rate
    }

    pub fn out_rate(&self) -> u32 {
        self.design.out_rate
    }

    pub fn n_taps(&self) -> usize {
        self.design.n_taps
    }

    pub fn format(&self) -> crate::sample::SampleFormat {
        S::FORMAT
    }

    /// Current fractional output-phase position, always `< out_rate`
    /// (testable property 1).
    pub fn samp_phase(&self) -> u32 {
        self.phase.samp_phase
    }

    /// Current read offset into retained history.
    pub fn samp_index(&self) -> u64 {
        self.phase.samp_index
    }
}

fn write_output<S: Sample>(
    output: &mut SampleOutput<'_, S>,
    frame: usize,
    channel: usize,
    value: S,
    channels: usize,
) {
    match output {
        SampleOutput::Interleaved(buf) => buf[frame * channels + channel] = value,
        SampleOutput::Planar(bufs) => bufs[channel][frame] = value,
    }
}
