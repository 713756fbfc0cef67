use std::io::Write;

use anyhow::Context;

use crate::{
    eval::evaluator::FrameOutput,
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange},
        error::{ReelError, ReelResult},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    pub range: FrameRange,
}

/// Consumer of evaluated frames.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameOutput) -> ReelResult<()>;
    /// Push a frame whose content equals the earlier frame `of`.
    fn push_repeat(
        &mut self,
        idx: FrameIndex,
        _of: FrameIndex,
        frame: &FrameOutput,
    ) -> ReelResult<()> {
        self.push_frame(idx, frame)
    }
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameOutput)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in timeline order.
    pub fn frames(&self) -> &[(FrameIndex, FrameOutput)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameOutput) -> ReelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct RepeatLine {
    frame: FrameIndex,
    repeat_of: FrameIndex,
}

/// Writes one JSON object per frame, newline separated.
///
/// Repeated frames are written as `{"frame": N, "repeat_of": M}`.
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
    last: Option<FrameIndex>,
    started: bool,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: None,
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn check_order(&mut self, idx: FrameIndex) -> ReelResult<()> {
        if !self.started {
            return Err(ReelError::evaluation("sink received a frame before begin"));
        }
        if let Some(last) = self.last
            && idx <= last
        {
            return Err(ReelError::evaluation(format!(
                "frames must be pushed in increasing order (got {} after {})",
                idx.0, last.0
            )));
        }
        self.last = Some(idx);
        Ok(())
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> ReelResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n").context("write frame line")?;
        Ok(())
    }
}

impl<W: Write + Send> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        self.started = true;
        self.last = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameOutput) -> ReelResult<()> {
        self.check_order(idx)?;
        self.write_line(frame)
    }

    fn push_repeat(
        &mut self,
        idx: FrameIndex,
        of: FrameIndex,
        _frame: &FrameOutput,
    ) -> ReelResult<()> {
        self.check_order(idx)?;
        self.write_line(&RepeatLine {
            frame: idx,
            repeat_of: of,
        })
    }

    fn end(&mut self) -> ReelResult<()> {
        self.out.flush().context("flush frame sink")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
