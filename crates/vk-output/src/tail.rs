//! Tail-window animation plan.
//!
//! An animated rendering shows, for every animation frame `f`, the flock at
//! trajectory frame `f + tail_length` plus `tail_length` trailing layers
//! that fade linearly:
//!
//! ```text
//! layer j ∈ 0..tail_length  →  trajectory frame f + tail_length − j,
//!                              alpha 1 − j / tail_length
//! ```
//!
//! Layer 0 coincides with the head.  With `frame_count` trajectory frames in
//! play there are `frame_count − tail_length` animation frames.  Rasterising
//! the layers is left to the caller; [`write_tail_csv`] dumps them for an
//! external plotting tool.

use std::path::Path;

use csv::Writer;
use vk_core::{Trajectory, Vec2};

use crate::{OutputError, OutputResult};

/// One fading layer of an animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailLayer {
    /// Index into the trajectory.
    pub frame: usize,
    /// Opacity in `(0, 1]`.
    pub alpha: f64,
}

/// Resolved animation frame, borrowing position slices from the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame<'a> {
    pub head:  &'a [Vec2],
    pub trail: Vec<(&'a [Vec2], f64)>,
}

/// Validated `(tail_length, frame_count)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailPlan {
    tail_length: usize,
    frame_count: usize,
}

impl TailPlan {
    /// Requires `1 ≤ tail_length ≤ frame_count ≤ frames_available`.
    pub fn new(frames_available: usize, tail_length: usize, frame_count: usize) -> OutputResult<Self> {
        if tail_length == 0 {
            return Err(OutputError::Tail("tail length must be at least 1".into()));
        }
        if tail_length > frame_count {
            return Err(OutputError::Tail(format!(
                "tail length {tail_length} exceeds frame count {frame_count}"
            )));
        }
        if frame_count > frames_available {
            return Err(OutputError::Tail(format!(
                "frame count {frame_count} exceeds the {frames_available} frames available"
            )));
        }
        Ok(Self { tail_length, frame_count })
    }

    pub fn tail_length(&self) -> usize {
        self.tail_length
    }

    /// Number of animation frames.
    pub fn animation_frames(&self) -> usize {
        self.frame_count - self.tail_length
    }

    /// Trajectory frame drawn at full size for animation frame `f`.
    pub fn head(&self, f: usize) -> usize {
        f + self.tail_length
    }

    /// Fading layers for animation frame `f`, most recent first.
    pub fn layers(&self, f: usize) -> impl Iterator<Item = TailLayer> + '_ {
        let step = 1.0 / self.tail_length as f64;
        (0..self.tail_length).map(move |j| TailLayer {
            frame: f + self.tail_length - j,
            alpha: 1.0 - step * j as f64,
        })
    }

    /// Resolve every animation frame against `trajectory`.
    pub fn animate<'a>(&self, trajectory: &'a Trajectory) -> OutputResult<Vec<AnimationFrame<'a>>> {
        let frame = |t: usize| {
            trajectory
                .frame(t)
                .ok_or_else(|| OutputError::Tail(format!("trajectory has no frame {t}")))
        };
        (0..self.animation_frames())
            .map(|f| -> OutputResult<AnimationFrame<'a>> {
                let trail = self
                    .layers(f)
                    .map(|layer| -> OutputResult<(&'a [Vec2], f64)> {
                        Ok((frame(layer.frame)?, layer.alpha))
                    })
                    .collect::<OutputResult<_>>()?;
                Ok(AnimationFrame { head: frame(self.head(f))?, trail })
            })
            .collect()
    }
}

/// Write `tail.csv` in `dir`: one row per agent per layer per animation
/// frame (`anim_frame,layer,source_frame,alpha,agent_id,x,y`).
pub fn write_tail_csv(dir: &Path, plan: &TailPlan, trajectory: &Trajectory) -> OutputResult<()> {
    let mut out = Writer::from_path(dir.join("tail.csv"))?;
    out.write_record(["anim_frame", "layer", "source_frame", "alpha", "agent_id", "x", "y"])?;
    for (f, anim) in plan.animate(trajectory)?.iter().enumerate() {
        for (layer, ((positions, alpha), source)) in
            anim.trail.iter().zip(plan.layers(f).map(|l| l.frame)).enumerate()
        {
            for (agent, p) in positions.iter().enumerate() {
                out.write_record(&[
                    f.to_string(),
                    layer.to_string(),
                    source.to_string(),
                    alpha.to_string(),
                    agent.to_string(),
                    p.x.to_string(),
                    p.y.to_string(),
                ])?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
