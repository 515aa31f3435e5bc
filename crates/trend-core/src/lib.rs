#![deny(warnings)]

//! Core domain models and invariants for the usage-series simulator.
//!
//! This crate defines the country profiles that seed a run, the per-year
//! record the simulator produces, and validation helpers for anything that
//! enters from outside the built-in table (YAML profiles, year ranges).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

mod profiles;

pub use profiles::{
    builtin_registry, load_profiles_yaml, ProfileRegistry, DEFAULT_COUNTRY, DEFAULT_PROFILE_KEY,
    MENU_COUNTRIES,
};

/// First year of the default simulation window (international launch).
pub const DEFAULT_START_YEAR: i32 = 2016;
/// Last year of the default simulation window.
pub const DEFAULT_END_YEAR: i32 = 2025;

/// Coarse adoption stage of a country's market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    /// Saturated, high-monetisation markets.
    Mature,
    /// Served by a domestic sister platform; lower user ceiling.
    Domestic,
    /// Early adoption with very fast growth.
    Emerging,
    /// Steady growth.
    Growing,
    /// Growth and ad revenue dampened by regulation.
    Regulated,
    /// Fast growth with heavy engagement.
    Booming,
}

impl MarketType {
    /// Lowercase label used in reports and YAML.
    pub fn as_str(self) -> &'static str {
        match self {
            MarketType::Mature => "mature",
            MarketType::Domestic => "domestic",
            MarketType::Emerging => "emerging",
            MarketType::Growing => "growing",
            MarketType::Regulated => "regulated",
            MarketType::Booming => "booming",
        }
    }

    /// Maximum share of the base population the user count may reach.
    pub fn ceiling_fraction(self) -> f64 {
        match self {
            MarketType::Domestic => 0.45,
            _ => 0.65,
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable per-country configuration seeding a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// Country name, or `default` for the fallback profile.
    pub name: String,
    /// Population at the first simulated year.
    pub population_base: f64,
    /// Platform users at the first simulated year.
    pub tiktok_users_base: f64,
    /// Adoption stage driving growth and multiplier branches.
    pub market_type: MarketType,
    /// Content-category tags, in display order.
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl CountryProfile {
    /// Whether the profile carries the given content tag.
    pub fn has_specialty(&self, tag: &str) -> bool {
        self.specialties.iter().any(|s| s == tag)
    }

    /// Hard cap on the simulated user count.
    pub fn user_ceiling(&self) -> f64 {
        self.population_base * self.market_type.ceiling_fraction()
    }
}

/// The seventeen derived metrics of a [`YearRecord`], in export order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Population,
    TiktokUsers,
    ActiveUsers,
    TimeSpentPerUser,
    VideosUploaded,
    LikesCount,
    SharesCount,
    CommentsCount,
    AdRevenue,
    CreatorEarnings,
    ECommerceRevenue,
    EngagementRate,
    UserGrowthRate,
    ViralityScore,
    UsersUnder25,
    Users25To34,
    UsersOver35,
}

impl Metric {
    /// All metrics in column order.
    pub const ALL: [Metric; 17] = [
        Metric::Population,
        Metric::TiktokUsers,
        Metric::ActiveUsers,
        Metric::TimeSpentPerUser,
        Metric::VideosUploaded,
        Metric::LikesCount,
        Metric::SharesCount,
        Metric::CommentsCount,
        Metric::AdRevenue,
        Metric::CreatorEarnings,
        Metric::ECommerceRevenue,
        Metric::EngagementRate,
        Metric::UserGrowthRate,
        Metric::ViralityScore,
        Metric::UsersUnder25,
        Metric::Users25To34,
        Metric::UsersOver35,
    ];

    /// Column name used in the tabular export.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::TiktokUsers => "TikTok_Users",
            Metric::ActiveUsers => "Active_Users",
            Metric::TimeSpentPerUser => "Time_Spent_Per_User",
            Metric::VideosUploaded => "Videos_Uploaded",
            Metric::LikesCount => "Likes_Count",
            Metric::SharesCount => "Shares_Count",
            Metric::CommentsCount => "Comments_Count",
            Metric::AdRevenue => "Ad_Revenue",
            Metric::CreatorEarnings => "Creator_Earnings",
            Metric::ECommerceRevenue => "E_Commerce_Revenue",
            Metric::EngagementRate => "Engagement_Rate",
            Metric::UserGrowthRate => "User_Growth_Rate",
            Metric::ViralityScore => "Virality_Score",
            Metric::UsersUnder25 => "Users_Under_25",
            Metric::Users25To34 => "Users_25_34",
            Metric::UsersOver35 => "Users_Over_35",
        }
    }
}

/// One simulated year. All metrics are plain non-negative floats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    pub population: f64,
    pub tiktok_users: f64,
    pub active_users: f64,
    /// Minutes per user per day.
    pub time_spent_per_user: f64,
    pub videos_uploaded: f64,
    pub likes_count: f64,
    pub shares_count: f64,
    pub comments_count: f64,
    pub ad_revenue: f64,
    pub creator_earnings: f64,
    pub e_commerce_revenue: f64,
    pub engagement_rate: f64,
    pub user_growth_rate: f64,
    pub virality_score: f64,
    pub users_under_25: f64,
    pub users_25_to_34: f64,
    pub users_over_35: f64,
}

impl YearRecord {
    /// Read a metric by column.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Population => self.population,
            Metric::TiktokUsers => self.tiktok_users,
            Metric::ActiveUsers => self.active_users,
            Metric::TimeSpentPerUser => self.time_spent_per_user,
            Metric::VideosUploaded => self.videos_uploaded,
            Metric::LikesCount => self.likes_count,
            Metric::SharesCount => self.shares_count,
            Metric::CommentsCount => self.comments_count,
            Metric::AdRevenue => self.ad_revenue,
            Metric::CreatorEarnings => self.creator_earnings,
            Metric::ECommerceRevenue => self.e_commerce_revenue,
            Metric::EngagementRate => self.engagement_rate,
            Metric::UserGrowthRate => self.user_growth_rate,
            Metric::ViralityScore => self.virality_score,
            Metric::UsersUnder25 => self.users_under_25,
            Metric::Users25To34 => self.users_25_to_34,
            Metric::UsersOver35 => self.users_over_35,
        }
    }

    /// Mutable access to a metric; used by the trend-adjustment pass.
    pub fn get_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Population => &mut self.population,
            Metric::TiktokUsers => &mut self.tiktok_users,
            Metric::ActiveUsers => &mut self.active_users,
            Metric::TimeSpentPerUser => &mut self.time_spent_per_user,
            Metric::VideosUploaded => &mut self.videos_uploaded,
            Metric::LikesCount => &mut self.likes_count,
            Metric::SharesCount => &mut self.shares_count,
            Metric::CommentsCount => &mut self.comments_count,
            Metric::AdRevenue => &mut self.ad_revenue,
            Metric::CreatorEarnings => &mut self.creator_earnings,
            Metric::ECommerceRevenue => &mut self.e_commerce_revenue,
            Metric::EngagementRate => &mut self.engagement_rate,
            Metric::UserGrowthRate => &mut self.user_growth_rate,
            Metric::ViralityScore => &mut self.virality_score,
            Metric::UsersUnder25 => &mut self.users_under_25,
            Metric::Users25To34 => &mut self.users_25_to_34,
            Metric::UsersOver35 => &mut self.users_over_35,
        }
    }
}

/// Ordered yearly records for one country.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesTable {
    /// Country the table was simulated for.
    pub country: String,
    /// First simulated year.
    pub start_year: i32,
    /// Last simulated year (inclusive).
    pub end_year: i32,
    /// One record per year, ascending.
    pub records: Vec<YearRecord>,
}

impl SeriesTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&YearRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&YearRecord> {
        self.records.last()
    }

    /// Calendar years covered by the table.
    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// One metric across all years.
    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| r.get(metric)).collect()
    }

    /// Arithmetic mean of a metric; 0 for an empty table.
    pub fn mean(&self, metric: Metric) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.records.iter().map(|r| r.get(metric)).sum();
        sum / self.records.len() as f64
    }
}

/// Validated inclusive year window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Build a range, rejecting reversed or implausible bounds.
    pub fn new(start: i32, end: i32) -> Result<Self, ValidationError> {
        for y in [start, end] {
            if !(2000..=2100).contains(&y) {
                return Err(ValidationError::YearOutOfRange(y));
            }
        }
        if start > end {
            return Err(ValidationError::ReversedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of years in the window.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}

/// Validation errors for profiles and run parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Year outside supported range [2000, 2100].
    #[error("year {0} is out of supported range [2000, 2100]")]
    YearOutOfRange(i32),
    /// Start year after end year.
    #[error("start year {start} is after end year {end}")]
    ReversedRange { start: i32, end: i32 },
    /// Profile name must not be blank.
    #[error("profile name must not be empty")]
    EmptyName,
    /// Seed magnitudes must be finite and strictly positive.
    #[error("profile {0}: population and user bases must be finite and > 0")]
    NonPositiveBase(String),
    /// Users base already above the market ceiling.
    #[error("profile {name}: users base {users} exceeds ceiling {ceiling}")]
    UsersAboveCeiling {
        name: String,
        users: f64,
        ceiling: f64,
    },
    /// A specialty tag listed twice or blank.
    #[error("profile {name}: invalid or duplicate specialty {tag:?}")]
    InvalidSpecialty { name: String, tag: String },
    /// YAML document could not be parsed.
    #[error("invalid profile document: {0}")]
    Parse(String),
}

/// Validate a country profile.
pub fn validate_profile(p: &CountryProfile) -> Result<(), ValidationError> {
    if p.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(p.population_base) || !positive(p.tiktok_users_base) {
        return Err(ValidationError::NonPositiveBase(p.name.clone()));
    }
    let ceiling = p.user_ceiling();
    if p.tiktok_users_base > ceiling {
        return Err(ValidationError::UsersAboveCeiling {
            name: p.name.clone(),
            users: p.tiktok_users_base,
            ceiling,
        });
    }
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for tag in &p.specialties {
        if tag.trim().is_empty() || !seen.insert(tag.as_str()) {
            return Err(ValidationError::InvalidSpecialty {
                name: p.name.clone(),
                tag: tag.clone(),
            });
        }
    }
    Ok(())
}
