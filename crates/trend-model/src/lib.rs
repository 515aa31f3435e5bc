#![deny(warnings)]

//! Per-stage formulas for the yearly usage model.
//!
//! Every function here is pure: it depends only on the profile, the calendar
//! year, the 0-based year offset and already-computed values of the same
//! year. Multiplications are kept in a fixed order so results are
//! bit-reproducible.
//! - Year brackets shared by most stages (2018/2020/2022 breakpoints)
//! - Audience: population, users with saturation, active users, age split
//! - Content: time spent, videos, likes, shares, comments
//! - Money: ad revenue, creator earnings, e-commerce revenue
//! - Scores: engagement, virality, growth rate

use serde::{Deserialize, Serialize};
use trend_core::{CountryProfile, MarketType};

/// Phase of the platform's life a calendar year falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearBracket {
    /// Before 2018.
    Launch,
    /// 2018–2019.
    Expansion,
    /// 2020–2021.
    Pandemic,
    /// 2022 onwards.
    Maturity,
}

impl YearBracket {
    pub fn of(year: i32) -> Self {
        if year < 2018 {
            YearBracket::Launch
        } else if year < 2020 {
            YearBracket::Expansion
        } else if year < 2022 {
            YearBracket::Pandemic
        } else {
            YearBracket::Maturity
        }
    }

    /// Pick the value for this bracket from a four-entry table.
    ///
    /// Example:
    /// assert_eq!(YearBracket::of(2019).pick([1, 2, 3, 4]), 2);
    pub fn pick<T: Copy>(self, table: [T; 4]) -> T {
        match self {
            YearBracket::Launch => table[0],
            YearBracket::Expansion => table[1],
            YearBracket::Pandemic => table[2],
            YearBracket::Maturity => table[3],
        }
    }
}

/// Baseline minutes per user per day before bracket scaling.
pub const BASE_MINUTES_PER_DAY: f64 = 45.0;
/// Share of likes that become shares.
pub const SHARE_RATIO: f64 = 0.08;
/// Share of likes that become comments.
pub const COMMENT_RATIO: f64 = 0.05;
/// Share of ad revenue paid out to creators.
pub const CREATOR_RATIO: f64 = 0.25;

/// Population after `offset` years of linear growth.
///
/// Example:
/// population(&us, 0) == 331_000_000.0
pub fn population(profile: &CountryProfile, offset: u32) -> f64 {
    let rate = match profile.market_type {
        MarketType::Mature => 0.004,
        MarketType::Booming => 0.012,
        _ => 0.008,
    };
    profile.population_base * (1.0 + rate * offset as f64)
}

/// Linear user growth rate for a market in a given calendar year.
pub fn user_growth_multiplier(market: MarketType, year: i32) -> f64 {
    match market {
        MarketType::Mature if year < 2020 => 0.35,
        MarketType::Mature => 0.08,
        MarketType::Booming => 0.25,
        MarketType::Emerging => 0.40,
        _ => 0.15,
    }
}

/// Platform users, clamped to the market's share of the base population.
pub fn tiktok_users(profile: &CountryProfile, year: i32, offset: u32) -> f64 {
    let rate = user_growth_multiplier(profile.market_type, year);
    let uncapped = profile.tiktok_users_base * (1.0 + rate * offset as f64);
    uncapped.min(profile.user_ceiling())
}

/// Share of users active in a year.
pub fn active_rate(market: MarketType) -> f64 {
    match market {
        MarketType::Mature => 0.75,
        MarketType::Booming => 0.85,
        _ => 0.70,
    }
}

pub fn active_users(profile: &CountryProfile, users: f64) -> f64 {
    users * active_rate(profile.market_type)
}

/// Minutes per user per day.
///
/// Example:
/// time_spent(&us, 2016) == 31.5
pub fn time_spent(profile: &CountryProfile, year: i32) -> f64 {
    let mut minutes = BASE_MINUTES_PER_DAY * YearBracket::of(year).pick([0.7, 0.9, 1.1, 1.2]);
    match profile.market_type {
        MarketType::Booming => minutes *= 1.15,
        MarketType::Emerging => minutes *= 1.25,
        _ => {}
    }
    minutes
}

/// Videos uploaded in a year. Booming markets take precedence over the
/// comedy bonus; the two never stack.
pub fn videos_uploaded(profile: &CountryProfile, year: i32, active: f64) -> f64 {
    let mut per_user = YearBracket::of(year).pick([0.8, 1.2, 1.5, 1.8]);
    if profile.market_type == MarketType::Booming {
        per_user *= 1.3;
    } else if profile.has_specialty("comedy") {
        per_user *= 1.2;
    }
    active * per_user * 365.0
}

pub fn likes(year: i32, videos: f64) -> f64 {
    videos * YearBracket::of(year).pick([150.0, 250.0, 350.0, 400.0])
}

pub fn shares(likes: f64) -> f64 {
    likes * SHARE_RATIO
}

pub fn comments(likes: f64) -> f64 {
    likes * COMMENT_RATIO
}

/// Advertising revenue from active users.
pub fn ad_revenue(profile: &CountryProfile, year: i32, active: f64) -> f64 {
    let mut per_user = YearBracket::of(year).pick([2.5, 5.0, 8.0, 12.0]);
    match profile.market_type {
        MarketType::Mature => per_user *= 1.5,
        MarketType::Regulated => per_user *= 0.7,
        _ => {}
    }
    active * per_user
}

pub fn creator_earnings(ad_revenue: f64) -> f64 {
    ad_revenue * CREATOR_RATIO
}

/// E-commerce revenue as a growing share of ad revenue; nothing before 2019.
pub fn e_commerce_revenue(profile: &CountryProfile, year: i32, ad_revenue: f64) -> f64 {
    let mut revenue = if year < 2019 {
        0.0
    } else if year < 2021 {
        ad_revenue * 0.1
    } else if year < 2023 {
        ad_revenue * 0.2
    } else {
        ad_revenue * 0.3
    };
    if profile.has_specialty("e-commerce") {
        revenue *= 1.5;
    }
    revenue
}

pub fn engagement_rate(profile: &CountryProfile, year: i32) -> f64 {
    let mut rate = YearBracket::of(year).pick([0.12, 0.16, 0.18, 0.20]);
    if profile.market_type == MarketType::Booming {
        rate *= 1.15;
    }
    rate
}

pub fn virality_score(profile: &CountryProfile, year: i32) -> f64 {
    let mut score = YearBracket::of(year).pick([1.2, 1.5, 1.8, 2.0]);
    if profile.has_specialty("music") || profile.has_specialty("dance") {
        score *= 1.2;
    }
    score
}

/// Relative change from `previous` to `current`, floored at 0. Returns 0
/// when `previous` is not positive.
///
/// Mature markets switch to a slower linear rate in 2020, which shrinks the
/// user count for that year. The raw change is negative there (about -0.36
/// for the United States); it is reported as zero growth.
pub fn growth_rate(previous: f64, current: f64) -> f64 {
    if previous > 0.0 {
        ((current - previous) / previous).max(0.0)
    } else {
        0.0
    }
}

/// Carries last year's user count across the yearly fold. Seeded with the
/// profile's users base.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthTracker {
    previous_users: f64,
}

impl GrowthTracker {
    pub fn new(profile: &CountryProfile) -> Self {
        Self {
            previous_users: profile.tiktok_users_base,
        }
    }

    /// Record this year's users and return the growth against last year.
    pub fn observe(&mut self, users: f64) -> f64 {
        let rate = growth_rate(self.previous_users, users);
        self.previous_users = users;
        rate
    }

    pub fn previous_users(&self) -> f64 {
        self.previous_users
    }
}

/// Age-bracket ratios of the user base. The three ratios sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgeSplit {
    pub under_25: f64,
    pub from_25_to_34: f64,
    pub over_35: f64,
}

impl AgeSplit {
    pub fn for_market(market: MarketType) -> Self {
        let under_25 = if market == MarketType::Mature { 0.45 } else { 0.60 };
        let from_25_to_34 = 0.30;
        Self {
            under_25,
            from_25_to_34,
            over_35: 1.0 - under_25 - from_25_to_34,
        }
    }

    /// User counts per bracket: (under 25, 25–34, over 35).
    pub fn apply(&self, users: f64) -> (f64, f64, f64) {
        (
            users * self.under_25,
            users * self.from_25_to_34,
            users * self.over_35,
        )
    }
}
