//! Sampling of an expression of `x` for graphing.

use serde::Serialize;

use crate::context::EvaluationContext;
use crate::error::EvalError;
use crate::eval::evaluate;
use crate::lexer::tokenize;
use crate::postfix::to_postfix;

/// How many points a graph is made of when nothing else is asked for.
pub const DEFAULT_SAMPLE_COUNT: usize = 400;

/// Points reserved up front, whatever count the caller asks for.
const MAX_PREALLOCATED: usize = 1 << 16;

/// The closed interval `x` is sampled over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
}

impl Domain {
    pub fn new(start: f64, end: f64) -> Self {
        Domain { start, end }
    }

    /// Returns `count` evenly spaced values from `start` to `end`, both
    /// included.
    pub fn linspace(&self, count: usize) -> impl Iterator<Item = f64> {
        let Domain { start, end } = *self;
        let last = count.saturating_sub(1).max(1) as f64;
        // the width of a finite domain can still overflow
        let width = end - start;

        (0..count).map(move |i| {
            if i + 1 == count && count > 1 {
                // avoid rounding errors on the last point
                return end;
            }
            let t = i as f64 / last;
            if width.is_finite() {
                start + width * t
            } else {
                start * (1.0 - t) + end * t
            }
        })
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::new(-10.0, 10.0)
    }
}

impl From<(f64, f64)> for Domain {
    fn from((start, end): (f64, f64)) -> Self {
        Domain::new(start, end)
    }
}

/// One point of a graph. `y` is NaN where the function is not defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    /// NaN is written as `null` when serialized
    #[serde(serialize_with = "serialize_y")]
    pub y: f64,
}

fn serialize_y<S: serde::Serializer>(y: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if y.is_nan() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(y)
    }
}

/// The points of a graph, in the order they were sampled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSeries {
    pub expression: String,
    pub points: Vec<Sample>,
}

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// How many points have no value, ie. gaps in the curve.
    pub fn gap_count(&self) -> usize {
        self.points.iter().filter(|p| p.y.is_nan()).count()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.y)
    }
}

/// Evaluates the expression at `count` evenly spaced values of `x` in the
/// domain.
///
/// The expression is only parsed once. Points where the function is not
/// defined get a NaN `y`, but any other error aborts the whole sampling.
/// The expression is checked even when no point is asked for.
pub fn sample_function<D: Into<Domain>>(
    expr: &str,
    domain: D,
    count: usize,
) -> Result<SampleSeries, EvalError> {
    let domain = domain.into();
    if !domain.start.is_finite() || !domain.end.is_finite() {
        return Err(EvalError::InvalidDomain {
            start: domain.start,
            end: domain.end,
        });
    }

    let sequence = to_postfix(&tokenize(expr)?)?;

    let mut ctx = EvaluationContext::with_x(domain.start);
    if count == 0 {
        evaluate(&sequence, &ctx)?;
    }

    let mut points = Vec::with_capacity(count.min(MAX_PREALLOCATED));
    for x in domain.linspace(count) {
        ctx.set_x(x);
        let y = evaluate(&sequence, &ctx)?;
        points.push(Sample { x, y });
    }

    let series = SampleSeries {
        expression: expr.to_string(),
        points,
    };
    tracing::debug!(
        expression = expr,
        count = series.len(),
        gaps = series.gap_count(),
        "sampled function"
    );
    Ok(series)
}

/// Samples the expression the way the graphing tab does: 400 points from
/// -10 to 10.
pub fn sample_function_default(expr: &str) -> Result<SampleSeries, EvalError> {
    sample_function(expr, Domain::default(), DEFAULT_SAMPLE_COUNT)
}
