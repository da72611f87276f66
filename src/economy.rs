//! Rocket economy: delta-V budget, currency, and the propulsion tier ladder.
//!
//! ## Tier ladder
//!
//! | Tier         | Upgrade cost  | Max delta-V |
//! |--------------|---------------|-------------|
//! | `Chemical`   | —             | 676         |
//! | `Nuclear`    | 100 000       | 1 352       |
//! | `Fusion`     | 500 000       | 5 050       |
//! | `Antimatter` | 2 500 000     | 17 675      |
//! | `Warp`       | 12 500 000    | 70 701      |
//!
//! An upgrade requires currency strictly greater than the next tier's cost.
//! Each upgrade action advances exactly one step; a windfall covering several
//! thresholds still needs several actions.  `Warp` is terminal.

use crate::constants::INITIAL_DELTA_V;
use crate::mining::OreBatch;
use crate::player::input::{InputFrame, InputToken};
use bevy::prelude::*;

// ── Tech tier ─────────────────────────────────────────────────────────────────

/// Propulsion technology level.
///
/// Tiers only advance along the fixed chain, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TechTier {
    #[default]
    Chemical,
    Nuclear,
    Fusion,
    Antimatter,
    Warp,
}

impl TechTier {
    /// The tier an upgrade would move to, or `None` at `Warp`.
    pub fn next(self) -> Option<TechTier> {
        match self {
            Self::Chemical => Some(Self::Nuclear),
            Self::Nuclear => Some(Self::Fusion),
            Self::Fusion => Some(Self::Antimatter),
            Self::Antimatter => Some(Self::Warp),
            Self::Warp => None,
        }
    }

    /// Currency needed (strictly exceeded) to *reach* this tier.
    ///
    /// `Chemical` is the starting tier and has no cost.
    pub fn cost(self) -> f64 {
        match self {
            Self::Chemical => 0.0,
            Self::Nuclear => 100_000.0,
            Self::Fusion => 500_000.0,
            Self::Antimatter => 2_500_000.0,
            Self::Warp => 12_500_000.0,
        }
    }

    /// Delta-V refilled when this tier is reached.
    pub fn max_delta_v(self) -> f64 {
        match self {
            Self::Chemical => INITIAL_DELTA_V,
            Self::Nuclear => 1_352.0,
            Self::Fusion => 5_050.0,
            Self::Antimatter => 17_675.0,
            Self::Warp => 70_701.0,
        }
    }

    /// Display name shown on the HUD.
    pub fn label(self) -> &'static str {
        match self {
            Self::Chemical => "chemical",
            Self::Nuclear => "nuclear",
            Self::Fusion => "fusion",
            Self::Antimatter => "antimatter",
            Self::Warp => "warp",
        }
    }

    /// Engine glow colour for this tier.
    pub fn engine_color(self) -> Color {
        match self {
            Self::Chemical => Color::srgb(1.0, 0.4, 0.0),
            Self::Nuclear => Color::srgb(1.0, 0.02, 0.02),
            Self::Fusion => Color::srgb(0.4, 0.0, 1.0),
            Self::Antimatter => Color::srgb(0.1, 0.12, 1.0),
            Self::Warp => Color::srgb(0.25, 0.5, 1.0),
        }
    }

    /// On-screen button tint for this tier.
    pub fn button_color(self) -> Color {
        match self {
            Self::Chemical => Color::srgb_u8(0xe6, 0x73, 0x00),
            Self::Nuclear => Color::srgb_u8(0xff, 0x33, 0x85),
            Self::Fusion => Color::srgb_u8(0x1a, 0x75, 0xff),
            Self::Antimatter => Color::srgb_u8(0x33, 0xcc, 0xff),
            Self::Warp => Color::srgb_u8(0x99, 0x99, 0xff),
        }
    }
}

/// Pure upgrade rule: `(tier, currency) → (tier', currency')`.
///
/// Advances one step and deducts the cost when `currency > cost(next)`;
/// otherwise returns the inputs unchanged.
pub fn try_upgrade(tier: TechTier, currency: f64) -> (TechTier, f64) {
    match tier.next() {
        Some(next) if currency > next.cost() => (next, currency - next.cost()),
        _ => (tier, currency),
    }
}

// ── Rocket economy ────────────────────────────────────────────────────────────

/// Result of one upgrade attempt, reported to the HUD and log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeOutcome {
    /// Tier advanced; `spent` currency was deducted.
    Upgraded { tier: TechTier, spent: f64 },
    /// Currency does not exceed the next tier's cost.
    InsufficientFunds { needed: f64 },
    /// Already at `Warp`.
    MaxTier,
}

/// Delta-V, cargo capacity, tier and currency of the player's rocket.
///
/// Invariants: `0 ≤ delta_v ≤ tier.max_delta_v()`, `currency ≥ 0`, tier
/// never regresses.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RocketEconomy {
    pub delta_v: f64,
    pub ore_capacity_kg: f64,
    pub tier: TechTier,
    pub currency: f64,
}

impl Default for RocketEconomy {
    fn default() -> Self {
        Self::new(crate::constants::ORE_CAPACITY_KG)
    }
}

impl RocketEconomy {
    /// A fresh chemical-tier rocket with a full tank and no money.
    pub fn new(ore_capacity_kg: f64) -> Self {
        Self {
            delta_v: TechTier::Chemical.max_delta_v(),
            ore_capacity_kg,
            tier: TechTier::Chemical,
            currency: 0.0,
        }
    }

    /// Burn `amount` of delta-V, flooring at zero.
    pub fn consume_delta_v(&mut self, amount: f64) {
        self.delta_v = (self.delta_v - amount).max(0.0);
    }

    /// Whether any delta-V remains for thrust.
    #[inline]
    pub fn has_fuel(&self) -> bool {
        self.delta_v > 0.0
    }

    /// Attempt a single-step tier upgrade.
    ///
    /// On success the tank is refilled to the new tier's maximum.
    pub fn upgrade(&mut self) -> UpgradeOutcome {
        let Some(next) = self.tier.next() else {
            return UpgradeOutcome::MaxTier;
        };
        let (tier, currency) = try_upgrade(self.tier, self.currency);
        if tier == self.tier {
            return UpgradeOutcome::InsufficientFunds {
                needed: next.cost(),
            };
        }
        let spent = self.currency - currency;
        self.tier = tier;
        self.currency = currency;
        self.delta_v = tier.max_delta_v();
        UpgradeOutcome::Upgraded { tier, spent }
    }

    /// Sell the whole ore batch, returning the currency earned.
    pub fn sell(&mut self, batch: &mut OreBatch) -> f64 {
        let sold = batch.take();
        self.currency += sold.value;
        sold.value
    }
}

// ── Trade ─────────────────────────────────────────────────────────────────────

/// Last sell/upgrade result, shown on the HUD until the next trade.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct TradeReport(pub Option<String>);

/// Handle sell and upgrade actions accepted this tick.
pub fn trade_system(
    frame: Res<InputFrame>,
    mut economy: ResMut<RocketEconomy>,
    mut batch: ResMut<OreBatch>,
    mut report: ResMut<TradeReport>,
) {
    match frame.action {
        Some(InputToken::Sell) => {
            let mass = batch.mass_kg;
            let earned = economy.sell(&mut batch);
            info!("Sold {mass:.0} kg of ore for {earned:.2}");
            report.0 = Some(format!("sold {mass:.0} kg for {earned:.2}"));
        }
        Some(InputToken::Upgrade) => {
            let message = match economy.upgrade() {
                UpgradeOutcome::Upgraded { tier, spent } => {
                    info!("Upgraded to {} for {spent:.0}", tier.label());
                    format!("upgraded to {}", tier.label())
                }
                UpgradeOutcome::InsufficientFunds { needed } => {
                    format!("need more than {needed:.0} to upgrade")
                }
                UpgradeOutcome::MaxTier => "already at maximum tier".to_string(),
            };
            report.0 = Some(message);
        }
        _ => {}
    }
}
