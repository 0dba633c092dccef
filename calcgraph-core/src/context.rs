use num_traits::Float;
use std::fmt;
use std::str::FromStr;

use crate::error::EvalError;

/// The name of the only free variable of an expression.
pub const VARIABLE: &str = "x";

/// The closed list of functions an expression may call.
///
/// Nothing outside of this list can ever be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    /// natural logarithm
    Log,
    Sqrt,
    Exp,
    Abs,
}

impl Function {
    pub const ALL: [Function; 7] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Log,
        Function::Sqrt,
        Function::Exp,
        Function::Abs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Log => "log",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
            Function::Abs => "abs",
        }
    }

    pub fn apply<F: Float>(self, x: F) -> F {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Log => x.ln(),
            Function::Sqrt => x.sqrt(),
            Function::Exp => x.exp(),
            Function::Abs => x.abs(),
        }
    }
}

impl FromStr for Function {
    type Err = ();

    fn from_str(s: &str) -> Result<Function, ()> {
        Function::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Turns every value that cannot be plotted into NaN.
///
/// Infinities come from things like `1/0` or `log(0)`, which are domain
/// errors just like `sqrt(-1)`.
pub fn normalize<F: Float>(val: F) -> F {
    if val.is_finite() {
        val
    } else {
        F::nan()
    }
}

/// The bindings an expression is evaluated against: the value of `x`, if
/// any, and the function table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvaluationContext {
    x: Option<f64>,
}

impl EvaluationContext {
    /// A context where `x` has no value, for plain calculations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x(x: f64) -> Self {
        Self { x: Some(x) }
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    /// Rebinds `x`, for example for the next sample of a graph.
    pub fn set_x(&mut self, x: f64) {
        self.x = Some(x);
    }

    /// The value of an identifier used as an operand.
    ///
    /// A function name without an argument has no value, which is a domain
    /// error and gives NaN.
    pub fn operand(&self, name: &str) -> Result<f64, EvalError> {
        if name == VARIABLE {
            return self
                .x
                .ok_or_else(|| EvalError::UnboundVariable(name.to_string()));
        }
        match name.parse::<Function>() {
            Ok(_) => Ok(f64::NAN),
            Err(()) => Err(EvalError::UnknownIdentifier(name.to_string())),
        }
    }

    /// The function called by `name(...)`.
    pub fn function(&self, name: &str) -> Result<Function, EvalError> {
        if name == VARIABLE {
            // `x(2)` is not a multiplication
            return Err(EvalError::InvalidExpression);
        }
        name.parse()
            .map_err(|()| EvalError::UnknownIdentifier(name.to_string()))
    }
}
