use rayon::prelude::*;

use crate::{
    composition::model::Reel,
    eval::{
        evaluator::{Evaluator, FrameOutput},
        fingerprint::{FrameFingerprint, fingerprint_frame},
    },
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{ReelError, ReelResult},
    },
    render::sink::{FrameSink, SinkConfig},
};

#[derive(Clone, Debug)]
pub struct EvalThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
    /// Detect frames identical to their predecessor and report them as repeats.
    pub static_frame_elision: bool,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    pub frames_total: u64,
    /// Frames emitted in full; with elision off this equals `frames_total`.
    pub frames_distinct: u64,
    pub frames_elided: u64,
}

/// Evaluate every frame of `range` (start inclusive, end exclusive) in timeline order.
///
/// The reel is validated once up front. Parallel and serial modes return identical frames.
pub fn eval_frames(
    reel: &Reel,
    range: FrameRange,
    threading: &EvalThreading,
) -> ReelResult<(Vec<FrameOutput>, EvalStats)> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let stats = drive(reel, range, threading, |frame, _repeat_of| {
        out.push(frame);
        Ok(())
    })?;
    Ok((out, stats))
}

/// Stream `range` into `sink`, calling `begin`/`end` around the frames.
#[tracing::instrument(skip(reel, threading, sink))]
pub fn eval_to_sink(
    reel: &Reel,
    range: FrameRange,
    threading: &EvalThreading,
    sink: &mut dyn FrameSink,
) -> ReelResult<EvalStats> {
    sink.begin(SinkConfig {
        canvas: reel.video.canvas,
        fps: reel.video.fps,
        range,
    })?;
    let stats = drive(reel, range, threading, |frame, repeat_of| match repeat_of {
        Some(of) => sink.push_repeat(frame.frame, of, &frame),
        None => sink.push_frame(frame.frame, &frame),
    })?;
    sink.end()?;
    tracing::info!(
        total = stats.frames_total,
        elided = stats.frames_elided,
        "range evaluated"
    );
    Ok(stats)
}

fn drive(
    reel: &Reel,
    range: FrameRange,
    threading: &EvalThreading,
    mut emit: impl FnMut(FrameOutput, Option<FrameIndex>) -> ReelResult<()>,
) -> ReelResult<EvalStats> {
    if range.is_empty() {
        return Err(ReelError::validation("eval range must be non-empty"));
    }
    if !range.is_ordered() || range.end.0 > reel.video.duration.0 {
        return Err(ReelError::validation(
            "eval range must lie within the reel duration",
        ));
    }
    reel.validate()?;

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut stats = EvalStats::default();
    let mut previous: Option<(FrameFingerprint, FrameIndex)> = None;

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let frames = match &pool {
            Some(pool) => eval_chunk_parallel(reel, chunk_start, chunk_end, pool)?,
            None => (chunk_start..chunk_end)
                .map(|f| Evaluator::eval_frame_unchecked(reel, FrameIndex(f)))
                .collect::<ReelResult<Vec<_>>>()?,
        };

        for frame in frames {
            stats.frames_total += 1;
            let repeat_of = if threading.static_frame_elision {
                let fp = fingerprint_frame(&frame);
                match previous {
                    Some((prev_fp, of)) if prev_fp == fp => Some(of),
                    _ => {
                        previous = Some((fp, frame.frame));
                        None
                    }
                }
            } else {
                None
            };
            if repeat_of.is_some() {
                stats.frames_elided += 1;
            } else {
                stats.frames_distinct += 1;
            }
            emit(frame, repeat_of)?;
        }
        chunk_start = chunk_end;
    }

    tracing::debug!(
        start = range.start.0,
        end = range.end.0,
        parallel = threading.parallel,
        "frames evaluated"
    );
    Ok(stats)
}

fn eval_chunk_parallel(
    reel: &Reel,
    start: u64,
    end: u64,
    pool: &rayon::ThreadPool,
) -> ReelResult<Vec<FrameOutput>> {
    let results = pool.install(|| {
        (start..end)
            .into_par_iter()
            .map(|f| Evaluator::eval_frame_unchecked(reel, FrameIndex(f)))
            .collect::<Vec<_>>()
    });
    results.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
