//! `reset` is idempotent and returns to the post-construction state
//! (testable property 4).
use polyphase_resample::prelude::*;

#[test]
fn reset_after_reset_matches_construction() {
    let mut r: Resampler<f32> = Resampler::new(Method::Cubic, false, 2, 44100, 48000, ResampleOptions::new()).unwrap();
    let before = (r.samp_phase(), r.samp_index());
    r.reset();
    let after_first = (r.samp_phase(), r.samp_index());
    r.reset();
    let after_second = (r.samp_phase(), r.samp_index());
    assert_eq!(before, after_first);
    assert_eq!(after_first, after_second);
}

#[test]
fn reset_after_activity_returns_to_fresh_state() {
    let mut r: Resampler<f32> = Resampler::new(Method::Kaiser, false, 1, 48000, 44100, ResampleOptions::new()).unwrap();
    let input = vec![0.7f32; 4096];
    let mut output = vec![0.0f32; 4096];
    for _ in 0..10 {
        let want = r.get_out_frames(input.len());
        r.resample(
            SampleInput::Interleaved(&input),
            input.len(),
            SampleOutput::Interleaved(&mut output[..want]),
            want,
        );
    }
    r.reset();
    let after_activity = (r.samp_phase(), r.samp_index());

    let mut fresh: Resampler<f32> = Resampler::new(Method::Kaiser, false, 1, 48000, 44100, ResampleOptions::new()).unwrap();
    fresh.reset();
    let fresh_state = (fresh.samp_phase(), fresh.samp_index());

    assert_eq!(after_activity, fresh_state);
}
