//! Aggregate statistics and heuristic recommendations for one country.

use crate::group_thousands;
use serde::Serialize;
use std::fmt;
use trend_core::{CountryProfile, MarketType, Metric, SeriesTable};

/// Platform milestones printed with every report.
pub const MILESTONES: [&str; 6] = [
    "2016: international launch",
    "2018: merger with Musical.ly and rapid expansion",
    "2020: usage peak during the COVID-19 pandemic",
    "2020: ban threats in the United States and elsewhere",
    "2021: accelerated e-commerce features",
    "2022-2025: market maturation and revenue diversification",
];

/// Percentage change from `first` to `last`; 0 when `first` is not positive.
pub fn pct_change(first: f64, last: f64) -> f64 {
    if first > 0.0 {
        (last / first - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Strategy hints keyed off market type, then specialties.
pub fn recommendations(profile: &CountryProfile) -> Vec<&'static str> {
    let mut out = Vec::new();
    match profile.market_type {
        MarketType::Mature => {
            out.push("Focus on monetisation and user retention");
            out.push("Develop new revenue streams (e-commerce, subscriptions)");
        }
        MarketType::Booming => {
            out.push("Capitalise on rapid growth to gain market share");
            out.push("Adapt content to local cultural specifics");
        }
        MarketType::Emerging => {
            out.push("Invest in marketing to accelerate adoption");
            out.push("Build partnerships with local creators");
        }
        _ => {}
    }
    if profile.has_specialty("e-commerce") {
        out.push("Expand e-commerce integrations and in-app shops");
    }
    if profile.has_specialty("music") {
        out.push("Strengthen partnerships with the music industry");
    }
    if profile.has_specialty("education") {
        out.push("Grow educational and informative content");
    }
    out
}

/// Summary of a finished series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Insights {
    pub country: String,
    pub start_year: i32,
    pub end_year: i32,
    pub market_type: MarketType,
    pub specialties: Vec<String>,
    pub avg_users: f64,
    pub avg_active_users: f64,
    /// Minutes per day.
    pub avg_time_spent: f64,
    pub user_growth_pct: f64,
    pub revenue_growth_pct: f64,
    pub under_25_share_pct: f64,
    pub over_35_share_pct: f64,
    pub avg_ad_revenue: f64,
    pub avg_creator_earnings: f64,
    pub ad_revenue_per_user: f64,
    pub recommendations: Vec<&'static str>,
}

impl Insights {
    /// Summarise `table`. An empty table gives zeroed aggregates.
    pub fn from_table(profile: &CountryProfile, table: &SeriesTable) -> Self {
        let avg_active_users = table.mean(Metric::ActiveUsers);
        let avg_ad_revenue = table.mean(Metric::AdRevenue);

        let (user_growth_pct, revenue_growth_pct) = match (table.first(), table.last()) {
            (Some(first), Some(last)) => (
                pct_change(first.tiktok_users, last.tiktok_users),
                pct_change(first.ad_revenue, last.ad_revenue),
            ),
            _ => (0.0, 0.0),
        };

        let (under_25_share_pct, over_35_share_pct) = match table.last() {
            Some(last) if last.tiktok_users > 0.0 => (
                last.users_under_25 / last.tiktok_users * 100.0,
                last.users_over_35 / last.tiktok_users * 100.0,
            ),
            _ => (0.0, 0.0),
        };

        let ad_revenue_per_user = if avg_active_users > 0.0 {
            avg_ad_revenue / avg_active_users
        } else {
            0.0
        };

        Self {
            country: table.country.clone(),
            start_year: table.start_year,
            end_year: table.end_year,
            market_type: profile.market_type,
            specialties: profile.specialties.clone(),
            avg_users: table.mean(Metric::TiktokUsers),
            avg_active_users,
            avg_time_spent: table.mean(Metric::TimeSpentPerUser),
            user_growth_pct,
            revenue_growth_pct,
            under_25_share_pct,
            over_35_share_pct,
            avg_ad_revenue,
            avg_creator_earnings: table.mean(Metric::CreatorEarnings),
            ad_revenue_per_user,
            recommendations: recommendations(profile),
        }
    }
}

impl fmt::Display for Insights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = format!("{}-{}", self.start_year, self.end_year);
        writeln!(f, "INSIGHTS - TikTok in {}", self.country)?;
        writeln!(f, "{}", "=".repeat(60))?;

        writeln!(f, "\n1. GENERAL STATISTICS")?;
        writeln!(f, "Average yearly users: {}", group_thousands(self.avg_users, 0))?;
        writeln!(f, "Average active users: {}", group_thousands(self.avg_active_users, 0))?;
        writeln!(f, "Average time spent per user: {:.1} min/day", self.avg_time_spent)?;

        writeln!(f, "\n2. GROWTH")?;
        writeln!(f, "User growth ({span}): {:.1}%", self.user_growth_pct)?;
        writeln!(f, "Ad revenue growth ({span}): {:.1}%", self.revenue_growth_pct)?;

        writeln!(f, "\n3. USER DEMOGRAPHICS")?;
        writeln!(f, "Share under 25: {:.1}%", self.under_25_share_pct)?;
        writeln!(f, "Share 35 and over: {:.1}%", self.over_35_share_pct)?;

        writeln!(f, "\n4. ECONOMY")?;
        writeln!(f, "Average ad revenue: ${} M", group_thousands(self.avg_ad_revenue, 2))?;
        writeln!(
            f,
            "Average creator earnings: ${} M",
            group_thousands(self.avg_creator_earnings, 2)
        )?;
        writeln!(f, "Ad revenue per active user: ${:.2}", self.ad_revenue_per_user)?;

        writeln!(f, "\n5. {} SPECIFICS", self.country.to_uppercase())?;
        writeln!(f, "Market type: {}", self.market_type)?;
        writeln!(f, "Specialties: {}", self.specialties.join(", "))?;

        writeln!(f, "\n6. MILESTONES")?;
        for m in MILESTONES {
            writeln!(f, "- {m}")?;
        }

        writeln!(f, "\n7. RECOMMENDATIONS")?;
        for r in &self.recommendations {
            writeln!(f, "- {r}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trend_core::builtin_registry;

    #[test]
    fn us_insights() {
        let us = builtin_registry().resolve("United States");
        let t = trend_runtime::simulate(us, 2016, 2025);
        let ins = Insights::from_table(us, &t);
        assert_eq!(ins.market_type, MarketType::Mature);
        assert!((ins.under_25_share_pct - 45.0).abs() < 1e-9);
        assert!((ins.over_35_share_pct - 25.0).abs() < 1e-9);
        let first = &t.records[0];
        let last = &t.records[9];
        assert_eq!(
            ins.user_growth_pct,
            (last.tiktok_users / first.tiktok_users - 1.0) * 100.0
        );
        assert!(ins.ad_revenue_per_user > 0.0);
        assert_eq!(ins.recommendations.len(), 3);
        assert!(ins.recommendations[2].contains("music"));
    }

    #[test]
    fn report_text_has_all_sections() {
        let china = builtin_registry().resolve("China");
        let t = trend_runtime::simulate(china, 2016, 2025);
        let text = Insights::from_table(china, &t).to_string();
        for heading in ["1. GENERAL", "2. GROWTH", "3. USER", "4. ECONOMY", "5. CHINA", "6. MILE", "7. RECOMM"] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Market type: domestic"));
        assert!(text.contains("e-commerce integrations"));
        assert!(text.contains("educational"));
    }

    #[test]
    fn empty_table_gives_zeroes() {
        let p = builtin_registry().fallback();
        let t = trend_runtime::simulate(p, 2020, 2019);
        let ins = Insights::from_table(p, &t);
        assert_eq!(ins.avg_users, 0.0);
        assert_eq!(ins.user_growth_pct, 0.0);
        assert_eq!(ins.under_25_share_pct, 0.0);
        assert_eq!(ins.ad_revenue_per_user, 0.0);
    }

    #[test]
    fn growing_market_has_only_specialty_hints() {
        let brazil = builtin_registry().resolve("Brazil");
        assert_eq!(
            recommendations(brazil),
            vec!["Strengthen partnerships with the music industry"]
        );
    }

    proptest! {
        #[test]
        fn pct_change_round_trips(first in 1.0f64..1e9, ratio in 0.0f64..10.0) {
            let last = first * ratio;
            let pct = pct_change(first, last);
            prop_assert!((pct - (ratio - 1.0) * 100.0).abs() < 1e-6);
        }
    }
}
