//! Mamdani fuzzy inference primitives
//!
//! A small max-min inference engine: linguistic variables carry named fuzzy
//! sets over a crisp universe, rules fire at the minimum of their antecedent
//! memberships, the clipped consequents are aggregated by pointwise max and
//! the crisp result is the centroid of the aggregate. Membership shapes are
//! unit-testable independently of any end-to-end score.

use crate::error::{EngineError, EngineResult};

/// Number of sample points used when defuzzifying an output universe
const CENTROID_SAMPLES: usize = 201;

/// Membership function shapes
#[derive(Debug, Clone, Copy)]
pub enum MembershipFunction {
    /// Triangle with feet at `a` and `c`, peak at `b`
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapezoid with feet at `a` and `d`, plateau over `[b, c]`
    ///
    /// Shoulders may degenerate (`a == b` or `c == d`) to anchor the
    /// plateau at a universe boundary.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Degree of truth in [0,1] for a crisp value
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x <= a || x >= c {
                    0.0
                } else if x <= b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        }
    }
}

/// A named fuzzy set within a variable
#[derive(Debug, Clone)]
pub struct FuzzySet {
    pub label: &'static str,
    pub function: MembershipFunction,
}

/// A linguistic variable: a crisp universe partitioned into fuzzy sets
#[derive(Debug, Clone)]
pub struct FuzzyVariable {
    pub name: &'static str,
    universe: (f64, f64),
    sets: Vec<FuzzySet>,
}

impl FuzzyVariable {
    pub fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            universe: (min, max),
            sets: Vec::new(),
        }
    }

    /// Add a named fuzzy set to the variable
    pub fn with_set(mut self, label: &'static str, function: MembershipFunction) -> Self {
        self.sets.push(FuzzySet { label, function });
        self
    }

    /// Saturate a crisp value at the universe bounds
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.universe.0, self.universe.1)
    }

    fn set(&self, label: &str) -> Option<&FuzzySet> {
        self.sets.iter().find(|s| s.label == label)
    }

    /// Membership degree of a crisp value in one of this variable's sets
    ///
    /// The value is saturated at the universe bounds before evaluation.
    pub fn degree_of(&self, label: &str, x: f64) -> EngineResult<f64> {
        let set = self.set(label).ok_or_else(|| {
            EngineError::Inference(format!(
                "variable '{}' has no set labelled '{}'",
                self.name, label
            ))
        })?;
        Ok(set.function.degree(self.clamp(x)))
    }
}

/// An IF-THEN rule: antecedent clauses combined with AND (min)
#[derive(Debug, Clone)]
pub struct FuzzyRule {
    /// (input variable name, set label) pairs
    pub antecedents: Vec<(&'static str, &'static str)>,
    /// Output set label the rule asserts
    pub consequent: &'static str,
}

impl FuzzyRule {
    pub fn new(antecedents: Vec<(&'static str, &'static str)>, consequent: &'static str) -> Self {
        Self {
            antecedents,
            consequent,
        }
    }
}

/// Max-min inference engine over one output variable
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inputs: Vec<FuzzyVariable>,
    output: FuzzyVariable,
    rules: Vec<FuzzyRule>,
}

impl InferenceEngine {
    pub fn new(inputs: Vec<FuzzyVariable>, output: FuzzyVariable, rules: Vec<FuzzyRule>) -> Self {
        Self {
            inputs,
            output,
            rules,
        }
    }

    fn input(&self, name: &str) -> EngineResult<&FuzzyVariable> {
        self.inputs.iter().find(|v| v.name == name).ok_or_else(|| {
            EngineError::Inference(format!("no input variable named '{}'", name))
        })
    }

    /// Firing strength of a rule: minimum membership over its antecedents
    fn firing_strength(&self, rule: &FuzzyRule, crisp: &[(&str, f64)]) -> EngineResult<f64> {
        let mut strength = 1.0_f64;
        for (var_name, label) in &rule.antecedents {
            let value = crisp
                .iter()
                .find(|(name, _)| name == var_name)
                .map(|(_, v)| *v)
                .ok_or_else(|| {
                    EngineError::InvalidInput(format!("no value supplied for '{}'", var_name))
                })?;
            let degree = self.input(var_name)?.degree_of(label, value)?;
            strength = strength.min(degree);
        }
        Ok(strength)
    }

    /// Run max-min inference and return the centroid of the aggregate
    pub fn infer(&self, crisp: &[(&str, f64)]) -> EngineResult<f64> {
        let mut fired = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let strength = self.firing_strength(rule, crisp)?;
            if strength > 0.0 {
                let set = self.output.set(rule.consequent).ok_or_else(|| {
                    EngineError::Inference(format!(
                        "output variable '{}' has no set labelled '{}'",
                        self.output.name, rule.consequent
                    ))
                })?;
                fired.push((strength, set));
            }
        }

        let (lo, hi) = self.output.universe;
        let step = (hi - lo) / (CENTROID_SAMPLES - 1) as f64;
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for i in 0..CENTROID_SAMPLES {
            let x = lo + step * i as f64;
            let mut mu: f64 = 0.0;
            for (strength, set) in &fired {
                mu = mu.max(set.function.degree(x).min(*strength));
            }
            weighted_sum += mu * x;
            total_weight += mu;
        }

        if total_weight <= f64::EPSILON {
            return Err(EngineError::Inference(
                "aggregated output is empty, no rule fired".to_string(),
            ));
        }
        Ok(weighted_sum / total_weight)
    }
}
