//! Mining: weighted-random resource draws and the ore batch they fill.
//!
//! ## Flow
//!
//! 1. [`ResourceTable::standard`] normalizes every [`ResourceKind`] weight once
//!    and builds a cumulative distribution in the enum's declaration order.
//! 2. While the mine input is held (and the hold is below capacity),
//!    [`mining_system`] calls [`ResourceTable::mine`]
//!    once per tick.
//! 3. `mine` performs [`DRAWS_PER_MINING_ACTION`](crate::constants::DRAWS_PER_MINING_ACTION)
//!    inverse-CDF draws.  A draw counts only if the drawn resource is present on
//!    the nearest body; otherwise it is consumed and discarded.
//! 4. Selling (see [`crate::economy::RocketEconomy::sell`]) moves the batch
//!    value into currency and empties the batch.
//!
//! Rare resources (antimatter ≈ 1.2e-6 after normalization) sit in the long
//! tail of the distribution.  Because the CDF is built once per table, the
//! tail never accumulates per-draw rounding error; the final cumulative entry
//! is pinned to exactly `1.0`.

use crate::catalog::{ResourceCatalog, ResourceKind};
use crate::economy::RocketEconomy;
use crate::error::{GameError, GameResult};
use crate::gravity::{BodyRegistry, GravityField};
use crate::player::input::InputFrame;
use crate::player::state::{FlightState, PlayerStatus};
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ── Ore batch ─────────────────────────────────────────────────────────────────

/// Unsold ore carried by the rocket.
///
/// Created empty on spawn, filled by repeated mining draws, zeroed on sale.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct OreBatch {
    /// Accumulated ore mass (kg); one unit per successful draw.
    pub mass_kg: f64,
    /// Accumulated sale value (currency).
    pub value: f64,
}

impl OreBatch {
    /// Empty the batch, returning what it held.
    pub fn take(&mut self) -> OreBatch {
        std::mem::take(self)
    }

    /// Whether another mining action is allowed under `capacity_kg`.
    #[inline]
    pub fn has_room(&self, capacity_kg: f64) -> bool {
        self.mass_kg < capacity_kg
    }
}

// ── Probability table ─────────────────────────────────────────────────────────

/// Normalized resource distribution plus per-unit sale values.
#[derive(Resource, Debug, Clone)]
pub struct ResourceTable {
    /// `(resource, cumulative probability)` in fixed table order.
    cumulative: Vec<(ResourceKind, f64)>,
    /// Draws performed by one call to [`Self::mine`].
    draws_per_action: u32,
}

impl Default for ResourceTable {
    fn default() -> Self {
        Self::standard(crate::constants::DRAWS_PER_MINING_ACTION)
    }
}

impl ResourceTable {
    /// Build a table from raw `(resource, weight)` pairs.
    ///
    /// Weights need not sum to 1; they are normalized here, once.  Entries
    /// with zero weight are kept but can never be drawn.
    pub fn from_weights(weights: &[(ResourceKind, f64)], draws_per_action: u32) -> GameResult<Self> {
        for &(resource, probability) in weights {
            if !probability.is_finite() || probability < 0.0 {
                return Err(GameError::InvalidProbability {
                    resource: resource.label(),
                    probability,
                });
            }
        }

        let total: f64 = weights.iter().map(|&(_, p)| p).sum();
        if weights.is_empty() || total <= 0.0 {
            return Err(GameError::EmptyProbabilityTable);
        }

        let mut running = 0.0;
        let mut cumulative: Vec<(ResourceKind, f64)> = weights
            .iter()
            .map(|&(resource, p)| {
                running += p / total;
                (resource, running)
            })
            .collect();

        // Pin the last positive-weight entry (and anything after it) to 1.0 so
        // every uniform draw in [0, 1) resolves.
        if let Some(last_positive) = weights.iter().rposition(|&(_, p)| p > 0.0) {
            for entry in &mut cumulative[last_positive..] {
                entry.1 = 1.0;
            }
        }

        Ok(Self {
            cumulative,
            draws_per_action,
        })
    }

    /// The standard 25-resource table using [`ResourceKind::base_probability`].
    pub fn standard(draws_per_action: u32) -> Self {
        let weights: Vec<(ResourceKind, f64)> = ResourceKind::ALL
            .iter()
            .map(|&r| (r, r.base_probability()))
            .collect();
        // Built-in weights are all positive and finite.
        match Self::from_weights(&weights, draws_per_action) {
            Ok(table) => table,
            Err(e) => unreachable!("built-in resource table is invalid: {e}"),
        }
    }

    /// Normalized probability of drawing `resource` (0 if absent).
    pub fn probability(&self, resource: ResourceKind) -> f64 {
        let mut previous = 0.0;
        for &(kind, cumulative) in &self.cumulative {
            if kind == resource {
                return cumulative - previous;
            }
            previous = cumulative;
        }
        0.0
    }

    /// Draws performed per mining action.
    #[inline]
    pub fn draws_per_action(&self) -> u32 {
        self.draws_per_action
    }

    /// Map a uniform sample in `[0, 1)` to a resource.
    ///
    /// Returns the first resource whose cumulative probability is `>= u`.
    ///
    /// # Panics
    ///
    /// Panics if no entry matches, which would mean the table no longer sums
    /// to 1.0.  That is a programming error, not a recoverable condition.
    pub fn resolve(&self, u: f64) -> ResourceKind {
        let idx = self.cumulative.partition_point(|&(_, c)| c < u);
        assert!(
            idx < self.cumulative.len(),
            "resource draw {u} matched no table entry (cumulative total {:?})",
            self.cumulative.last().map(|&(_, c)| c)
        );
        self.cumulative[idx].0
    }

    /// Draw one resource.
    pub fn draw(&self, rng: &mut impl Rng) -> ResourceKind {
        self.resolve(rng.gen::<f64>())
    }

    /// Perform one mining action against a body stocking `present`.
    ///
    /// Each draw found in `present` adds 1 kg and the resource's unit value to
    /// `batch`.  Draws not present are discarded.  Returns the number of
    /// draws that counted.
    pub fn mine(&self, rng: &mut impl Rng, present: &[ResourceKind], batch: &mut OreBatch) -> u32 {
        let mut hits = 0;
        for _ in 0..self.draws_per_action {
            let resource = self.draw(rng);
            if present.contains(&resource) {
                batch.mass_kg += 1.0;
                batch.value += resource.unit_value();
                hits += 1;
            }
        }
        hits
    }
}

// ── RNG ───────────────────────────────────────────────────────────────────────

/// Random source for mining draws.
///
/// Seeded from `GameConfig::rng_seed` when present so runs can be replayed;
/// otherwise seeded from OS entropy.
#[derive(Resource)]
pub struct MiningRng(pub ChaCha8Rng);

impl MiningRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }
}

impl Default for MiningRng {
    fn default() -> Self {
        Self::from_seed(None)
    }
}

// ── Laser indicator ───────────────────────────────────────────────────────────

/// Whether the mining laser is currently firing (drives the beam visual).
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningLaser {
    pub active: bool,
}

// ── System ────────────────────────────────────────────────────────────────────

/// Mine the nearest body while the mine input is held.
///
/// Refused silently when the rocket is dead or the ore batch is at capacity.
/// The laser is active exactly on the ticks a mining action ran.
#[allow(clippy::too_many_arguments)]
pub fn mining_system(
    frame: Res<InputFrame>,
    flight: Res<FlightState>,
    field: Res<GravityField>,
    registry: Res<BodyRegistry>,
    catalog: Res<ResourceCatalog>,
    table: Res<ResourceTable>,
    economy: Res<RocketEconomy>,
    mut rng: ResMut<MiningRng>,
    mut batch: ResMut<OreBatch>,
    mut laser: ResMut<MiningLaser>,
) {
    let can_mine = frame.mining_held()
        && flight.status != PlayerStatus::Dead
        && batch.has_room(economy.ore_capacity_kg);
    if !can_mine {
        laser.active = false;
        return;
    }

    // Unknown or missing bodies fall back to the default resource set.
    let planet = field
        .nearest
        .and_then(|id| registry.get(id))
        .map_or("", |body| body.name.as_str());
    let present = catalog.resources_for(planet);
    table.mine(&mut rng.0, present, &mut batch);
    laser.active = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_RESOURCES;
    use std::collections::HashMap;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn standard_table_is_normalized() {
        let table = ResourceTable::standard(100);
        let total: f64 = ResourceKind::ALL.iter().map(|&r| table.probability(r)).sum();
        assert!((total - 1.0).abs() < 1e-12, "total = {total}");
        assert_eq!(table.cumulative.last().map(|&(_, c)| c), Some(1.0));
    }

    #[test]
    fn resolve_covers_the_unit_interval() {
        let table = ResourceTable::standard(100);
        assert_eq!(table.resolve(0.0), ResourceKind::Water);
        assert_eq!(table.resolve(1.0 - f64::EPSILON), ResourceKind::Antimatter);
        assert_eq!(table.resolve(1.0), ResourceKind::Antimatter);
    }

    #[test]
    fn rarest_resource_keeps_its_tail_probability() {
        let table = ResourceTable::standard(100);
        let total: f64 = ResourceKind::ALL.iter().map(|r| r.base_probability()).sum();
        let expected = 0.0000012 / total;
        let p = table.probability(ResourceKind::Antimatter);
        assert!((p - expected).abs() / expected < 1e-6, "p = {p}, expected {expected}");
    }

    #[test]
    fn empirical_frequencies_converge() {
        let table = ResourceTable::standard(100);
        let mut rng = rng();
        let n = 400_000;
        let mut counts: HashMap<ResourceKind, u32> = HashMap::new();
        for _ in 0..n {
            *counts.entry(table.draw(&mut rng)).or_default() += 1;
        }
        // Check the common resources, where the sampling error is small.
        for kind in [
            ResourceKind::Water,
            ResourceKind::Sulfur,
            ResourceKind::Coal,
            ResourceKind::Iron,
        ] {
            let p = table.probability(kind);
            let observed = f64::from(counts.get(&kind).copied().unwrap_or(0)) / f64::from(n);
            let sigma = (p * (1.0 - p) / f64::from(n)).sqrt();
            assert!(
                (observed - p).abs() < 5.0 * sigma,
                "{kind:?}: observed {observed}, expected {p}"
            );
        }
    }

    #[test]
    fn unnormalized_weights_are_normalized_once() {
        let table = ResourceTable::from_weights(
            &[(ResourceKind::Water, 3.0), (ResourceKind::Gold, 1.0)],
            10,
        )
        .unwrap();
        assert!((table.probability(ResourceKind::Water) - 0.75).abs() < 1e-12);
        assert!((table.probability(ResourceKind::Gold) - 0.25).abs() < 1e-12);
        assert_eq!(table.resolve(0.75), ResourceKind::Water);
        assert_eq!(table.resolve(0.7500001), ResourceKind::Gold);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        assert_eq!(
            ResourceTable::from_weights(&[], 1).unwrap_err(),
            GameError::EmptyProbabilityTable
        );
        assert_eq!(
            ResourceTable::from_weights(&[(ResourceKind::Water, 0.0)], 1).unwrap_err(),
            GameError::EmptyProbabilityTable
        );
        assert!(matches!(
            ResourceTable::from_weights(&[(ResourceKind::Water, -0.5)], 1),
            Err(GameError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn trailing_zero_weight_is_never_drawn() {
        let table = ResourceTable::from_weights(
            &[(ResourceKind::Water, 1.0), (ResourceKind::Antimatter, 0.0)],
            1,
        )
        .unwrap();
        assert_eq!(table.resolve(0.999_999), ResourceKind::Water);
    }

    #[test]
    fn mining_only_counts_resources_present() {
        let table = ResourceTable::standard(100);
        let mut rng = rng();
        let mut batch = OreBatch::default();
        let hits = table.mine(&mut rng, &[], &mut batch);
        assert_eq!(hits, 0);
        assert_eq!(batch, OreBatch::default());

        let all = ResourceKind::ALL;
        let hits = table.mine(&mut rng, &all, &mut batch);
        assert_eq!(hits, 100);
        assert_eq!(batch.mass_kg, 100.0);
        assert!(batch.value > 0.0);
    }

    #[test]
    fn single_resource_planet_yields_n_times_p() {
        let table = ResourceTable::standard(100);
        let mut rng = rng();
        let mut batch = OreBatch::default();
        let actions = 5_000;
        for _ in 0..actions {
            table.mine(&mut rng, &[ResourceKind::Iron], &mut batch);
        }
        let expected = f64::from(actions * 100) * table.probability(ResourceKind::Iron);
        let sigma = expected.sqrt();
        assert!(
            (batch.mass_kg - expected).abs() < 5.0 * sigma,
            "mass {} expected {expected}",
            batch.mass_kg
        );
        assert!((batch.value - batch.mass_kg * 2.0).abs() < 1e-6);
    }

    #[test]
    fn rare_only_planet_yields_little_ore() {
        let table = ResourceTable::standard(100);
        let mut rng = rng();
        let mut batch = OreBatch::default();
        let actions = 20_000;
        for _ in 0..actions {
            table.mine(&mut rng, &[ResourceKind::Rhodium], &mut batch);
        }
        let expected = f64::from(actions * 100) * table.probability(ResourceKind::Rhodium);
        assert!(expected > 50.0, "expected {expected}");
        let sigma = expected.sqrt();
        assert!(
            (batch.mass_kg - expected).abs() < 5.0 * sigma,
            "mass {} expected {expected}",
            batch.mass_kg
        );
        let unit = ResourceKind::Rhodium.unit_value();
        assert!((batch.value - batch.mass_kg * unit).abs() < 1e-6 * batch.value.max(1.0));
        // Under one kilogram per thousand draws.
        assert!(batch.mass_kg < f64::from(actions * 100) * 0.001);
    }

    #[test]
    fn batch_mass_never_decreases_while_mining() {
        let table = ResourceTable::standard(100);
        let mut rng = rng();
        let mut batch = OreBatch::default();
        let mut last = 0.0;
        for _ in 0..200 {
            table.mine(&mut rng, &DEFAULT_RESOURCES, &mut batch);
            assert!(batch.mass_kg >= last);
            last = batch.mass_kg;
        }
    }

    #[test]
    fn take_empties_the_batch() {
        let mut batch = OreBatch {
            mass_kg: 12.0,
            value: 30.0,
        };
        let sold = batch.take();
        assert_eq!(sold.value, 30.0);
        assert_eq!(batch, OreBatch::default());
        assert!(batch.has_room(1.0));
    }

    // ── mining_system ─────────────────────────────────────────────────────────

    fn mining_app(token: crate::player::input::InputToken, batch: OreBatch) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(InputFrame {
            token,
            ..InputFrame::default()
        });
        app.insert_resource(FlightState::default());
        app.insert_resource(GravityField::default());
        app.insert_resource(BodyRegistry::default());
        app.insert_resource(ResourceCatalog::default());
        app.insert_resource(ResourceTable::standard(100));
        app.insert_resource(RocketEconomy::default());
        app.insert_resource(MiningRng::from_seed(Some(3)));
        app.insert_resource(batch);
        app.insert_resource(MiningLaser::default());
        app.add_systems(Update, mining_system);
        app
    }

    #[test]
    fn held_mine_input_fires_laser_and_fills_batch() {
        use crate::player::input::InputToken;
        let mut app = mining_app(InputToken::Mine, OreBatch::default());
        app.update();
        assert!(app.world().resource::<MiningLaser>().active);
        // No nearest body: the default set (water, oxygen, iron, aluminum) applies.
        assert!(app.world().resource::<OreBatch>().mass_kg > 0.0);

        app.insert_resource(InputFrame::default());
        app.update();
        assert!(!app.world().resource::<MiningLaser>().active);
    }

    #[test]
    fn full_hold_refuses_mining() {
        use crate::player::input::InputToken;
        let full = OreBatch {
            mass_kg: crate::constants::ORE_CAPACITY_KG,
            value: 1.0,
        };
        let mut app = mining_app(InputToken::Mine, full);
        app.update();
        assert!(!app.world().resource::<MiningLaser>().active);
        assert_eq!(*app.world().resource::<OreBatch>(), full);
    }
}
