//! Post-hoc trend adjustments: fixed multipliers applied to specific cells
//! of an already-simulated table, by calendar-year window.

use serde::Serialize;
use tracing::debug;
use trend_core::{CountryProfile, MarketType, Metric, SeriesTable, YearRecord};

/// Extra requirement a profile must meet for an adjustment to fire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum TrendCondition {
    Always,
    Specialty(&'static str),
    Market(MarketType),
}

impl TrendCondition {
    fn holds(self, profile: &CountryProfile) -> bool {
        match self {
            TrendCondition::Always => true,
            TrendCondition::Specialty(tag) => profile.has_specialty(tag),
            TrendCondition::Market(m) => profile.market_type == m,
        }
    }
}

/// One multiplicative step event over an inclusive year window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrendAdjustment {
    pub label: &'static str,
    pub first_year: i32,
    /// Inclusive; `None` means open-ended.
    pub last_year: Option<i32>,
    pub condition: TrendCondition,
    pub metric: Metric,
    pub factor: f64,
}

impl TrendAdjustment {
    pub fn applies(&self, profile: &CountryProfile, year: i32) -> bool {
        let in_window = year >= self.first_year && self.last_year.map_or(true, |l| year <= l);
        in_window && self.condition.holds(profile)
    }
}

/// Adjustments in application order. Rows falling in several windows get
/// the multipliers in exactly this order.
pub const TREND_ADJUSTMENTS: [TrendAdjustment; 6] = [
    TrendAdjustment {
        label: "launch surge",
        first_year: 2016,
        last_year: Some(2018),
        condition: TrendCondition::Always,
        metric: Metric::UserGrowthRate,
        factor: 1.2,
    },
    TrendAdjustment {
        label: "international expansion",
        first_year: 2019,
        last_year: Some(2020),
        condition: TrendCondition::Always,
        metric: Metric::AdRevenue,
        factor: 1.3,
    },
    TrendAdjustment {
        label: "pandemic usage",
        first_year: 2020,
        last_year: Some(2021),
        condition: TrendCondition::Always,
        metric: Metric::TimeSpentPerUser,
        factor: 1.25,
    },
    TrendAdjustment {
        label: "pandemic usage",
        first_year: 2020,
        last_year: Some(2021),
        condition: TrendCondition::Always,
        metric: Metric::ActiveUsers,
        factor: 1.15,
    },
    TrendAdjustment {
        label: "e-commerce push",
        first_year: 2021,
        last_year: Some(2023),
        condition: TrendCondition::Specialty("e-commerce"),
        metric: Metric::ECommerceRevenue,
        factor: 1.4,
    },
    TrendAdjustment {
        label: "market maturity",
        first_year: 2023,
        last_year: None,
        condition: TrendCondition::Market(MarketType::Mature),
        metric: Metric::UserGrowthRate,
        factor: 0.7,
    },
];

/// Apply every matching adjustment to one record, in list order.
/// Derived values are not recomputed afterwards.
pub fn adjust_record(profile: &CountryProfile, record: &mut YearRecord) {
    for adj in TREND_ADJUSTMENTS.iter() {
        if adj.applies(profile, record.year) {
            *record.get_mut(adj.metric) *= adj.factor;
            debug!(
                year = record.year,
                label = adj.label,
                metric = adj.metric.column_name(),
                factor = adj.factor,
                "trend adjustment"
            );
        }
    }
}

/// Run the adjustment pass over a whole table in place.
pub fn apply_trends(profile: &CountryProfile, table: &mut SeriesTable) {
    for record in table.records.iter_mut() {
        adjust_record(profile, record);
    }
}
