#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Random 2-SAT instances.
//!
//! Literals are drawn uniformly from the non-zero integers in `[-n, n]`. A planted instance
//! first draws a hidden assignment and redraws every clause that assignment falsifies, so
//! the result is satisfiable by construction.

use crate::sat::assignment::Model;
use crate::sat::clause::Clause;
use crate::sat::instance::{ExpectedAnswer, Instance};
use crate::sat::literal::{Lit, Variable};
use fastrand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    pub num_vars: usize,
    pub num_clauses: usize,
    /// Only emit clauses satisfied by a hidden assignment.
    pub planted: bool,
}

impl GeneratorConfig {
    #[must_use]
    pub const fn new(num_vars: usize, num_clauses: usize) -> Self {
        Self {
            num_vars,
            num_clauses,
            planted: false,
        }
    }

    #[must_use]
    pub const fn planted(self, planted: bool) -> Self {
        Self { planted, ..self }
    }
}

fn random_literal(rng: &mut Rng, max_var: Variable) -> Lit {
    Lit::new(rng.u32(1..=max_var), rng.bool())
}

fn random_clause(rng: &mut Rng, max_var: Variable) -> Clause {
    Clause::new(random_literal(rng, max_var), random_literal(rng, max_var))
}

/// Generates one instance with the given id.
///
/// An instance over zero variables has no literals to draw from and comes back without
/// clauses. Variable counts beyond the signed 32-bit literal range are clamped to it.
#[must_use]
pub fn generate(config: &GeneratorConfig, rng: &mut Rng, id: usize) -> Instance {
    let max_var = Variable::try_from(config.num_vars)
        .unwrap_or(Variable::MAX)
        .min(i32::MAX.unsigned_abs());
    let mut instance = Instance::new(id, max_var as usize);
    if max_var == 0 {
        return instance;
    }

    let hidden = config
        .planted
        .then(|| Model::from((0..max_var).map(|_| rng.bool()).collect::<Vec<_>>()));

    instance.clauses = (0..config.num_clauses)
        .map(|_| loop {
            let clause = random_clause(rng, max_var);
            if hidden.as_ref().is_none_or(|model| model.satisfies(&clause)) {
                break clause;
            }
        })
        .collect();
    instance.declared_clauses = Some(config.num_clauses);
    if config.planted {
        instance.expected = ExpectedAnswer::Satisfiable;
    }

    instance
}

/// Generates `count` instances numbered from 1.
#[must_use]
pub fn generate_batch(config: &GeneratorConfig, rng: &mut Rng, count: usize) -> Vec<Instance> {
    (1..=count).map(|id| generate(config, rng, id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::solver::TwoSat;

    #[test]
    fn test_shape() {
        let mut rng = Rng::with_seed(1);
        let instance = generate(&GeneratorConfig::new(10, 25), &mut rng, 3);

        assert_eq!(instance.id, 3);
        assert_eq!(instance.num_vars, 10);
        assert_eq!(instance.num_clauses(), 25);
        assert_eq!(instance.declared_clauses, Some(25));
        assert!(instance.max_variable() <= 10);
        assert_eq!(instance.expected, ExpectedAnswer::Unknown);
    }

    #[test]
    fn test_same_seed_same_instances() {
        let config = GeneratorConfig::new(20, 40);
        let a = generate_batch(&config, &mut Rng::with_seed(99), 4);
        let b = generate_batch(&config, &mut Rng::with_seed(99), 4);
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_planted_instances_are_satisfiable() {
        let config = GeneratorConfig::new(30, 150).planted(true);
        let mut rng = Rng::with_seed(5);

        for instance in generate_batch(&config, &mut rng, 20) {
            assert_eq!(instance.expected, ExpectedAnswer::Satisfiable);
            let solution = TwoSat::from_instance(&instance).unwrap().solve();
            let model = solution.model().expect("planted instance must be satisfiable");
            assert!(instance.verify(model));
        }
    }

    #[test]
    fn test_zero_variables() {
        let instance = generate(&GeneratorConfig::new(0, 10), &mut Rng::with_seed(0), 1);
        assert_eq!(instance.num_vars, 0);
        assert!(instance.clauses.is_empty());
    }
}
