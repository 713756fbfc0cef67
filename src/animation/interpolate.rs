//! Piecewise interpolation of a scalar input over keyed ranges.

use crate::{
    animation::ease::Ease,
    foundation::{
        error::{ReelError, ReelResult},
        math::{inverse_lerp, lerp},
    },
};

/// Behavior outside the outermost input keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Continue the edge segment linearly.
    #[default]
    Extend,
    /// Hold the edge output value.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterpolateOpts {
    pub ease: Ease,
    pub left: Extrapolate,
    pub right: Extrapolate,
}

impl InterpolateOpts {
    pub fn clamped() -> Self {
        Self {
            ease: Ease::Linear,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Map `input` through the piecewise curve defined by `input_range -> output_range`.
///
/// The easing applies per segment inside the keyed range; extension past the edges is linear.
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOpts,
) -> ReelResult<f64> {
    validate_ranges(input_range, output_range)?;
    if input.is_nan() {
        return Err(ReelError::animation("interpolate input must not be NaN"));
    }

    let seg = find_segment(input, input_range);
    let (x0, x1) = (input_range[seg], input_range[seg + 1]);
    let (y0, y1) = (output_range[seg], output_range[seg + 1]);

    let last = input_range.len() - 1;
    let left = if seg == 0 { opts.left } else { Extrapolate::Extend };
    let right = if seg + 1 == last {
        opts.right
    } else {
        Extrapolate::Extend
    };

    let mut x = input;
    if x < x0 {
        match left {
            Extrapolate::Identity => return Ok(x),
            Extrapolate::Clamp => x = x0,
            Extrapolate::Extend => {}
        }
    }
    if x > x1 {
        match right {
            Extrapolate::Identity => return Ok(x),
            Extrapolate::Clamp => x = x1,
            Extrapolate::Extend => {}
        }
    }

    if y0 == y1 {
        return Ok(y0);
    }

    let t = inverse_lerp(x0, x1, x);
    let te = if (0.0..=1.0).contains(&t) {
        opts.ease.apply(t)
    } else {
        t
    };
    Ok(lerp(y0, y1, te))
}

/// Two-key interpolation clamped on both sides.
///
/// Total over its domain: a degenerate window (`x1 <= x0`) behaves as a step at `x0`.
pub fn ramp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64, ease: Ease) -> f64 {
    if x1 <= x0 {
        return if x < x0 { y0 } else { y1 };
    }
    if x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    lerp(y0, y1, ease.apply(inverse_lerp(x0, x1, x)))
}

fn find_segment(input: f64, input_range: &[f64]) -> usize {
    let mut i = 1;
    while i < input_range.len() - 1 {
        if input_range[i] >= input {
            break;
        }
        i += 1;
    }
    i - 1
}

fn validate_ranges(input_range: &[f64], output_range: &[f64]) -> ReelResult<()> {
    if input_range.len() != output_range.len() {
        return Err(ReelError::animation(format!(
            "input range ({}) and output range ({}) must have the same length",
            input_range.len(),
            output_range.len()
        )));
    }
    if input_range.len() < 2 {
        return Err(ReelError::animation(
            "interpolate ranges need at least two keys",
        ));
    }
    if input_range.iter().chain(output_range).any(|v| !v.is_finite()) {
        return Err(ReelError::animation("interpolate ranges must be finite"));
    }
    if !input_range.windows(2).all(|w| w[0] < w[1]) {
        return Err(ReelError::animation(
            "interpolate input range must be strictly increasing",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
