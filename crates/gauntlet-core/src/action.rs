//! Control actions, observations, and their space descriptors.

use std::fmt;

/// Number of components in a well-formed control action.
pub const ACTION_DIM: usize = 2;

/// A flat observation vector.
///
/// Length is fixed per world and described by [`ObservationSpace`];
/// it never changes over a simulator's lifetime.
pub type Observation = Vec<f32>;

/// A control action submitted to the simulator.
///
/// The wire form is a numeric vector; a well-formed action has exactly
/// two components, `[steering, throttle]`, each conventionally bounded
/// to `[-1, 1]`. The adapter checks the component count against the
/// advertised [`ActionSpace`] before the simulator ever sees the action.
/// Out-of-range values are deliberately *not* clamped here; range
/// handling is the simulator's documented behavior, not the adapter's.
#[derive(Clone, Debug, PartialEq)]
pub struct Action(Vec<f64>);

impl Action {
    /// A well-formed `[steering, throttle]` action.
    pub fn new(steering: f64, throttle: f64) -> Self {
        Self(vec![steering, throttle])
    }

    /// Wrap an arbitrary component vector without shape checking.
    ///
    /// Shape validation happens at the adapter boundary, where a
    /// mismatch against the action space is a reportable error rather
    /// than a construction panic.
    pub fn from_vec(components: Vec<f64>) -> Self {
        Self(components)
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the action has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw component slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The `[steering, throttle]` pair, or `None` if the action does not
    /// have exactly two components.
    pub fn components(&self) -> Option<[f64; 2]> {
        match self.0.as_slice() {
            &[steering, throttle] => Some([steering, throttle]),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

// ── Space descriptors ───────────────────────────────────────────

/// Shape and conventional bounds of the action space.
///
/// Pure data, queryable before any reset and constant for the
/// simulator's lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionSpace {
    /// Number of action components.
    pub dim: usize,
    /// Conventional lower bound per component.
    pub low: f64,
    /// Conventional upper bound per component.
    pub high: f64,
}

impl ActionSpace {
    /// The `[steering, throttle]` space used by driving simulators.
    pub fn steering_throttle() -> Self {
        Self {
            dim: ACTION_DIM,
            low: -1.0,
            high: 1.0,
        }
    }

    /// Whether an action's shape matches this space.
    ///
    /// Shape only; component *values* are never checked here.
    pub fn matches(&self, action: &Action) -> bool {
        action.len() == self.dim
    }
}

impl fmt::Display for ActionSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box({}, [{}, {}])", self.dim, self.low, self.high)
    }
}

/// Shape of the flat observation vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObservationSpace {
    /// Number of elements in the observation vector.
    pub shape: usize,
}

impl fmt::Display for ObservationSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},)", self.shape)
    }
}
