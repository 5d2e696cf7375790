//! Circuit topologies: which qubits carry a gate in each moment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use digicircs_qstr::RandomSource;

use crate::error::{GenResult, check_weights};

/// Default weights of the idle, one-qubit and two-qubit classes.
pub const DEFAULT_CLASS_WEIGHTS: [f64; 3] = [0.2, 0.6, 0.2];

/// Qubits acted on in one moment. No qubit appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    /// Targets of one-qubit gates.
    pub one_qubit: Vec<u32>,
    /// `(target, control)` pairs of two-qubit gates.
    pub two_qubit: Vec<(u32, u32)>,
}

impl Moment {
    /// Two-qubit operands as `[target, control, target, control, ...]`.
    pub fn flat_pairs(&self) -> Vec<u32> {
        self.two_qubit.iter().flat_map(|&(t, c)| [t, c]).collect()
    }

    /// Number of gates.
    pub fn gate_count(&self) -> usize {
        self.one_qubit.len() + self.two_qubit.len()
    }

    /// Every qubit touched, one-qubit targets first.
    pub fn qubits(&self) -> impl Iterator<Item = u32> + '_ {
        self.one_qubit.iter().copied().chain(self.flat_pairs())
    }
}

/// Moments plus their one- and two-qubit gate counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub moments: Vec<Moment>,
    pub n_1q: usize,
    pub n_2q: usize,
}

impl Topology {
    /// Build from moments, counting their gates.
    pub fn from_moments(moments: Vec<Moment>) -> Self {
        let n_1q = moments.iter().map(|m| m.one_qubit.len()).sum();
        let n_2q = moments.iter().map(|m| m.two_qubit.len()).sum();
        Self { moments, n_1q, n_2q }
    }

    /// Total number of gate slots.
    pub fn gate_count(&self) -> usize {
        self.n_1q + self.n_2q
    }
}

/// How moments are filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyOptions {
    /// Relative weights of idle, one-qubit and two-qubit qubits.
    pub weights: [f64; 3],
    /// Largest `|target - control|`. `None` means unbounded.
    pub max_distance: Option<u32>,
    /// Start with a moment that puts a one-qubit gate on every qubit.
    pub local_rot_moment: bool,
}

impl Default for TopologyOptions {
    fn default() -> Self {
        Self {
            weights: DEFAULT_CLASS_WEIGHTS,
            max_distance: None,
            local_rot_moment: false,
        }
    }
}

/// Generate `n_moments` moments on `n_qubits` qubits.
///
/// A leading local-rotation moment counts towards `n_moments`.
pub fn gen_topology(
    n_qubits: u32,
    n_moments: usize,
    options: &TopologyOptions,
    rng: &mut RandomSource,
) -> GenResult<Topology> {
    check_weights(&options.weights)?;
    let mut moments = Vec::with_capacity(n_moments);
    let mut remaining = n_moments;

    if options.local_rot_moment && remaining > 0 {
        moments.push(Moment {
            one_qubit: (0..n_qubits).collect(),
            two_qubit: Vec::new(),
        });
        remaining -= 1;
    }
    for _ in 0..remaining {
        moments.push(gen_moment(n_qubits, options, rng)?);
    }

    let topology = Topology::from_moments(moments);
    debug!(
        "Generated topology with {} moments, {} one-qubit and {} two-qubit slots",
        topology.moments.len(),
        topology.n_1q,
        topology.n_2q
    );
    Ok(topology)
}

/// Generate a single moment.
///
/// A share of `(w1 + 2 w2) / (w0 + w1 + 2 w2)` of the qubits is active. Each
/// active qubit in turn becomes a target, classified as one- or two-qubit by
/// `[w1, w2]`. A two-qubit target takes a control from the remaining active
/// qubits within `max_distance`, or from all of them when none is close
/// enough. A two-qubit target with no qubit left becomes a one-qubit target.
pub fn gen_moment(n_qubits: u32, options: &TopologyOptions, rng: &mut RandomSource) -> GenResult<Moment> {
    let [w0, w1, w2] = options.weights;
    let total = check_weights(&[w0, w1, 2.0 * w2])?;
    let active_share = (w1 + 2.0 * w2) / total;
    let n_active = (f64::from(n_qubits) * active_share) as usize;
    let max_distance = options.max_distance.unwrap_or(n_qubits);

    let qubits: Vec<u32> = (0..n_qubits).collect();
    rng.reseed();
    let mut pool = rng.sample(&qubits, n_active);
    let mut moment = Moment::default();

    while !pool.is_empty() {
        rng.reseed();
        let target = pool.remove(rng.gen_range(0..pool.len()));
        rng.reseed();
        let two_qubit = w1 + w2 > 0.0 && rng.weighted_index(&[w1, w2]) == 1;

        if two_qubit && !pool.is_empty() {
            let control = take_control(&mut pool, target, max_distance, rng);
            moment.two_qubit.push((target, control));
        } else {
            moment.one_qubit.push(target);
        }
    }
    Ok(moment)
}

/// Remove and return a control from a non-empty `pool`.
fn take_control(pool: &mut Vec<u32>, target: u32, max_distance: u32, rng: &mut RandomSource) -> u32 {
    let near: Vec<usize> = if max_distance as usize >= pool.len() {
        Vec::new()
    } else {
        (0..pool.len())
            .filter(|&i| pool[i].abs_diff(target) <= max_distance)
            .collect()
    };

    rng.reseed();
    let index = if near.is_empty() {
        rng.gen_range(0..pool.len())
    } else {
        near[rng.gen_range(0..near.len())]
    };
    pool.remove(index)
}
