//! Derivative-free design optimization: a bounded compass search over
//! parameter handles, with the spot size on a screen as its objective.

pub mod objective;
pub mod param;

pub use objective::{Objective, SpotMetric};
pub use param::Param;

use log::{debug, trace, warn};

use crate::{
    error::Error,
    scene::Scene,
    utils::timer::{format_elapsed, timed_scope},
};

/// Knobs of [`minimize`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Objective evaluation budget; rejected proposals count too.
    pub max_evals: usize,
    /// Convergence tolerance on both step size and per-sweep improvement.
    pub tol: f64,
    /// Step applied to every parameter during the first sweeps.
    pub initial_step: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_evals: 1000,
            tol: 1e-6,
            initial_step: 0.1,
        }
    }
}

/// How a minimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Step size shrank to the tolerance without further improvement.
    Converged,
    /// Evaluation budget exhausted.
    IterationLimit,
    /// The starting point could not be evaluated (an initial value outside
    /// its bounds, or an undefined initial objective), or the step shrank to
    /// the tolerance without a single valid proposal ever being evaluated.
    Failed,
}

/// Result of a minimization run. `values` matches the parameter list order
/// and the scene is left at these best known values; it is empty when the
/// starting point itself violated its bounds and the scene was never
/// touched.
#[derive(Debug, Clone)]
pub struct Minimum {
    pub values: Vec<f64>,
    /// Best objective value, NaN when the starting point itself could not
    /// be evaluated.
    pub objective: f64,
    pub evaluations: usize,
    /// Objective after the initial evaluation and after every acceptance;
    /// non-increasing by construction.
    pub history: Vec<f64>,
    pub status: Status,
}

/// Minimize `objective` over the fields bound by `params`.
///
/// Cyclic compass search: each sweep probes every parameter at plus and
/// minus the current step and keeps strict improvements only. Proposals
/// rejected for bounds, impossible geometry or an undefined objective are
/// rolled back but still charged against the budget. A sweep that improves
/// less than the tolerance halves the step; the run converges when the step
/// itself has shrunk to the tolerance. A run that exhausts its steps without
/// ever evaluating a valid proposal ends `Failed` instead.
///
/// Surfaces are only ever mutated between bundle traces.
pub fn minimize(
    scene: &mut Scene,
    params: &[Param],
    objective: &Objective,
    options: &Options,
) -> Result<Minimum, Error> {
    let timed = timed_scope(|| search(scene, params, objective, options));
    debug!(target: "optim", "minimization finished in {}", format_elapsed(timed.elapsed));
    timed.res
}

fn search(
    scene: &mut Scene,
    params: &[Param],
    objective: &Objective,
    options: &Options,
) -> Result<Minimum, Error> {
    if params.is_empty() {
        return Err(Error::NoParameters);
    }

    let mut values = Vec::with_capacity(params.len());
    for param in params {
        values.push(param.get(scene)?);
    }

    for i in 0..params.len() {
        if let Some((lo, hi)) = params[i].bounds {
            if values[i] < lo || values[i] > hi {
                warn!(
                    target: "optim",
                    "initial value {} of '{}' outside [{lo}, {hi}]",
                    values[i], params[i].label
                );
                return Ok(Minimum {
                    values: vec![],
                    objective: f64::NAN,
                    evaluations: 0,
                    history: vec![],
                    status: Status::Failed,
                });
            }
        }
    }

    let mut evaluations = 1;
    let mut best = match objective.evaluate(scene) {
        Ok(value) => value,
        Err(Error::EmptySpot(id)) => {
            warn!(target: "optim", "no ray of the starting design reaches screen {id:?}");
            return Ok(Minimum {
                values,
                objective: f64::NAN,
                evaluations,
                history: vec![],
                status: Status::Failed,
            });
        }
        Err(err) => return Err(err),
    };
    let mut history = vec![best];
    let mut step = options.initial_step;
    let mut any_valid = false;

    let status = 'run: loop {
        let sweep_start = best;

        for (i, param) in params.iter().enumerate() {
            for sign in [1.0, -1.0] {
                if evaluations >= options.max_evals {
                    break 'run Status::IterationLimit;
                }

                let candidate = values[i] + sign * step;
                evaluations += 1;
                match param.set(scene, candidate) {
                    Ok(()) => {}
                    Err(Error::OutOfBounds { .. }) | Err(Error::InvalidGeometry(_)) => {
                        trace!(target: "optim", "'{}' = {candidate} rejected", param.label);
                        continue;
                    }
                    Err(err) => return Err(err),
                }

                match objective.evaluate(scene) {
                    Ok(value) if value < best => {
                        any_valid = true;
                        debug!(
                            target: "optim",
                            "'{}' {} -> {candidate}, objective {value:.6e}",
                            param.label, values[i]
                        );
                        values[i] = candidate;
                        best = value;
                        history.push(value);
                        break;
                    }
                    Ok(_) => {
                        any_valid = true;
                        param.set(scene, values[i])?
                    }
                    Err(Error::EmptySpot(_)) => {
                        trace!(
                            target: "optim",
                            "'{}' = {candidate} leaves the spot empty",
                            param.label
                        );
                        param.set(scene, values[i])?;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if sweep_start - best < options.tol {
            if step <= options.tol {
                // A run whose every probe was rejected never searched at all
                break if any_valid {
                    Status::Converged
                } else {
                    Status::Failed
                };
            }
            step *= 0.5;
            trace!(target: "optim", "step halved to {step:.3e}");
        }
    };

    debug!(
        target: "optim",
        "{status:?} after {evaluations} evaluations, objective {best:.6e}"
    );
    Ok(Minimum {
        values,
        objective: best,
        evaluations,
        history,
        status,
    })
}
