#![deny(warnings)]

//! Series simulator: one forward pass per year over the stage formulas,
//! followed by the trend-adjustment pass.

use tracing::{debug, info};
use trend_core::{CountryProfile, ProfileRegistry, SeriesTable, YearRange, YearRecord};
use trend_model as model;
use trend_model::{AgeSplit, GrowthTracker};

mod trends;

pub use trends::{
    adjust_record, apply_trends, TrendAdjustment, TrendCondition, TREND_ADJUSTMENTS,
};

/// Compute every stage for one year, in dependency order.
fn year_record(
    profile: &CountryProfile,
    year: i32,
    offset: u32,
    growth: &mut GrowthTracker,
) -> YearRecord {
    let population = model::population(profile, offset);
    let users = model::tiktok_users(profile, year, offset);
    let active = model::active_users(profile, users);
    let videos = model::videos_uploaded(profile, year, active);
    let likes = model::likes(year, videos);
    let ad_revenue = model::ad_revenue(profile, year, active);
    let (under_25, from_25_to_34, over_35) =
        AgeSplit::for_market(profile.market_type).apply(users);

    YearRecord {
        year,
        population,
        tiktok_users: users,
        active_users: active,
        time_spent_per_user: model::time_spent(profile, year),
        videos_uploaded: videos,
        likes_count: likes,
        shares_count: model::shares(likes),
        comments_count: model::comments(likes),
        ad_revenue,
        creator_earnings: model::creator_earnings(ad_revenue),
        e_commerce_revenue: model::e_commerce_revenue(profile, year, ad_revenue),
        engagement_rate: model::engagement_rate(profile, year),
        user_growth_rate: growth.observe(users),
        virality_score: model::virality_score(profile, year),
        users_under_25: under_25,
        users_25_to_34: from_25_to_34,
        users_over_35: over_35,
    }
}

/// Simulate `[start_year, end_year]` without the trend-adjustment pass.
/// A reversed range yields an empty table.
pub fn simulate_unadjusted(
    profile: &CountryProfile,
    start_year: i32,
    end_year: i32,
) -> SeriesTable {
    let records: Vec<YearRecord> = (start_year..=end_year)
        .enumerate()
        .scan(GrowthTracker::new(profile), |growth, (offset, year)| {
            let record = year_record(profile, year, offset as u32, growth);
            debug!(
                year,
                users = record.tiktok_users,
                growth = record.user_growth_rate,
                "simulated year"
            );
            Some(record)
        })
        .collect();
    SeriesTable {
        country: profile.name.clone(),
        start_year,
        end_year,
        records,
    }
}

/// Simulate a country over `[start_year, end_year]`, trend pass included.
/// Pure and deterministic: identical inputs give a bit-identical table.
pub fn simulate(profile: &CountryProfile, start_year: i32, end_year: i32) -> SeriesTable {
    info!(
        country = %profile.name,
        market = %profile.market_type,
        start_year,
        end_year,
        "simulating series"
    );
    let mut table = simulate_unadjusted(profile, start_year, end_year);
    apply_trends(profile, &mut table);
    info!(rows = table.len(), "series ready");
    table
}

/// [`simulate`] over a validated range.
pub fn simulate_range(profile: &CountryProfile, range: YearRange) -> SeriesTable {
    simulate(profile, range.start, range.end)
}

/// Simulate the profile registered for `country`. The table keeps the
/// requested name even when the fallback profile supplies the parameters;
/// a blank name takes the profile's own.
pub fn simulate_country(
    registry: &ProfileRegistry,
    country: &str,
    range: YearRange,
) -> SeriesTable {
    let profile = registry.resolve(country);
    let mut table = simulate_range(profile, range);
    let label = country.trim();
    if !label.is_empty() {
        table.country = label.to_string();
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trend_core::{builtin_registry, MarketType, Metric, DEFAULT_PROFILE_KEY, MENU_COUNTRIES};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    fn all_profiles() -> Vec<&'static CountryProfile> {
        let reg = builtin_registry();
        let mut v: Vec<_> = MENU_COUNTRIES.iter().map(|n| reg.resolve(n)).collect();
        v.push(reg.fallback());
        v
    }

    #[test]
    fn us_two_year_example() {
        let us = builtin_registry().resolve("United States");
        let t = simulate(us, 2016, 2017);
        assert_eq!(t.len(), 2);
        let y0 = &t.records[0];
        assert_eq!(y0.year, 2016);
        assert_eq!(y0.population, 331_000_000.0);
        assert_eq!(y0.tiktok_users, 100_000_000.0);
        assert_eq!(y0.active_users, 75_000_000.0);
        assert!(close(y0.time_spent_per_user, 31.5));
        let y1 = &t.records[1];
        assert_eq!(y1.tiktok_users, 135_000_000.0);
        assert!(close(y1.user_growth_rate, 0.42));

        let raw = simulate_unadjusted(us, 2016, 2017);
        assert!(close(raw.records[1].user_growth_rate, 0.35));
    }

    #[test]
    fn table_shape_matches_range() {
        for p in all_profiles() {
            let t = simulate(p, 2016, 2025);
            assert_eq!(t.len(), 10);
            assert_eq!(t.country, p.name);
            for (i, r) in t.records.iter().enumerate() {
                assert_eq!(r.year, 2016 + i as i32);
            }
        }
        let range = YearRange::new(2018, 2020).unwrap();
        assert_eq!(simulate_range(all_profiles()[0], range).years(), vec![2018, 2019, 2020]);
    }

    #[test]
    fn reversed_range_is_empty() {
        let t = simulate(all_profiles()[0], 2020, 2019);
        assert!(t.is_empty());
    }

    #[test]
    fn invariants_hold_for_every_country() {
        for p in all_profiles() {
            let t = simulate(p, 2016, 2025);
            for r in &t.records {
                let ages = r.users_under_25 + r.users_25_to_34 + r.users_over_35;
                assert!(close(ages, r.tiktok_users), "{} {}", p.name, r.year);
                assert!(r.tiktok_users <= p.user_ceiling(), "{} {}", p.name, r.year);
                for m in Metric::ALL {
                    let v = r.get(m);
                    assert!(v.is_finite() && v >= 0.0, "{} {} {:?}={}", p.name, r.year, m, v);
                }
                assert_eq!(r.shares_count, r.likes_count * 0.08);
                assert_eq!(r.comments_count, r.likes_count * 0.05);
            }
        }
    }

    #[test]
    fn unknown_country_matches_default() {
        let reg = builtin_registry();
        let a = simulate(reg.resolve("Narnia"), 2016, 2025);
        let b = simulate(reg.resolve(DEFAULT_PROFILE_KEY), 2016, 2025);
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn unknown_country_keeps_requested_name() {
        let reg = builtin_registry();
        let range = YearRange::default();
        let t = simulate_country(reg, "Narnia", range);
        assert_eq!(t.country, "Narnia");
        assert_eq!(t.records, simulate_range(reg.fallback(), range).records);
        assert_eq!(simulate_country(reg, "Japan", range).country, "Japan");
        assert_eq!(simulate_country(reg, "  ", range).country, DEFAULT_PROFILE_KEY);
    }

    #[test]
    fn vietnam_2021_row() {
        let vn = builtin_registry().resolve("Vietnam");
        assert_eq!(vn.market_type, MarketType::Booming);
        let t = simulate(vn, 2016, 2025);
        let r = &t.records[5];
        assert_eq!(r.year, 2021);

        // 50M * (1 + 0.25 * 5) is past the 65% ceiling of 97.3M.
        let users = 97_300_000.0 * 0.65;
        let active = users * 0.85;
        let videos = active * (1.5 * 1.3) * 365.0;
        let likes = videos * 350.0;
        let ad = active * 8.0;
        assert_eq!(r.population, 97_300_000.0 * (1.0 + 0.012 * 5.0));
        assert_eq!(r.tiktok_users, users);
        assert_eq!(r.active_users, active * 1.15);
        assert_eq!(r.time_spent_per_user, 45.0 * 1.1 * 1.15 * 1.25);
        assert_eq!(r.videos_uploaded, videos);
        assert_eq!(r.likes_count, likes);
        assert_eq!(r.shares_count, likes * 0.08);
        assert_eq!(r.comments_count, likes * 0.05);
        assert_eq!(r.ad_revenue, ad);
        assert_eq!(r.creator_earnings, ad * 0.25);
        assert_eq!(r.e_commerce_revenue, ad * 0.2);
        assert_eq!(r.engagement_rate, 0.18 * 1.15);
        assert_eq!(r.user_growth_rate, 0.0);
        assert_eq!(r.virality_score, 1.8 * 1.2);
        assert_eq!(r.users_under_25, users * 0.60);
        assert_eq!(r.users_25_to_34, users * 0.30);

        // 2017 sits just under the ceiling; 2018 saturates and gets the launch boost.
        let (y2017, y2018) = (&t.records[1], &t.records[2]);
        assert_eq!(y2017.tiktok_users, 50_000_000.0 * (1.0 + 0.25 * 1.0));
        assert!(close(y2018.user_growth_rate, (users - 62_500_000.0) / 62_500_000.0 * 1.2));
    }

    #[test]
    fn first_year_growth_is_against_users_base() {
        for p in all_profiles() {
            let t = simulate_unadjusted(p, 2019, 2025);
            let r = &t.records[0];
            let expected = (r.tiktok_users - p.tiktok_users_base) / p.tiktok_users_base;
            assert_eq!(r.user_growth_rate, expected);
        }
    }

    #[test]
    fn simulation_is_idempotent() {
        for p in all_profiles() {
            let a = simulate(p, 2016, 2025);
            let b = simulate(p, 2016, 2025);
            for (x, y) in a.records.iter().zip(&b.records) {
                for m in Metric::ALL {
                    assert_eq!(x.get(m).to_bits(), y.get(m).to_bits());
                }
            }
        }
    }

    #[test]
    fn trend_pass_rescales_without_recomputing() {
        let reg = builtin_registry();
        let us = reg.resolve("United States");
        let raw = simulate_unadjusted(us, 2016, 2025);
        let adj = simulate(us, 2016, 2025);
        let idx = |y: i32| (y - 2016) as usize;

        let (r, a) = (&raw.records[idx(2020)], &adj.records[idx(2020)]);
        assert_eq!(a.active_users, r.active_users * 1.15);
        assert_eq!(a.ad_revenue, r.ad_revenue * 1.3);
        assert_eq!(a.time_spent_per_user, r.time_spent_per_user * 1.25);
        assert_eq!(a.creator_earnings, r.creator_earnings);
        assert_eq!(a.e_commerce_revenue, r.e_commerce_revenue);

        let (r, a) = (&raw.records[idx(2024)], &adj.records[idx(2024)]);
        assert_eq!(a.user_growth_rate, r.user_growth_rate * 0.7);

        let china = reg.resolve("China");
        let raw = simulate_unadjusted(china, 2016, 2025);
        let adj = simulate(china, 2016, 2025);
        for y in 2021..=2023 {
            assert_eq!(
                adj.records[idx(y)].e_commerce_revenue,
                raw.records[idx(y)].e_commerce_revenue * 1.4
            );
        }
        assert_eq!(
            adj.records[idx(2024)].e_commerce_revenue,
            raw.records[idx(2024)].e_commerce_revenue
        );
    }

    #[test]
    fn mature_contraction_reports_zero_growth() {
        let us = builtin_registry().resolve("United States");
        let t = simulate_unadjusted(us, 2016, 2025);
        let (y2019, y2020) = (&t.records[3], &t.records[4]);
        assert!(y2020.tiktok_users < y2019.tiktok_users);
        assert_eq!(y2020.user_growth_rate, 0.0);
        assert_eq!(us.market_type, MarketType::Mature);
    }

    proptest! {
        #[test]
        fn arbitrary_profiles_keep_invariants(
            pop in 1_000.0f64..2e9,
            frac in 0.01f64..0.45,
            market_idx in 0usize..6,
            start in 2010i32..2030,
            span in 0i32..15,
            shop in any::<bool>(),
        ) {
            let markets = [
                MarketType::Mature, MarketType::Domestic, MarketType::Emerging,
                MarketType::Growing, MarketType::Regulated, MarketType::Booming,
            ];
            let mut specialties = vec!["music".to_string()];
            if shop {
                specialties.push("e-commerce".to_string());
            }
            let p = CountryProfile {
                name: "Prop".into(),
                population_base: pop,
                tiktok_users_base: pop * frac,
                market_type: markets[market_idx],
                specialties,
            };
            let t = simulate(&p, start, start + span);
            prop_assert_eq!(t.len() as i32, span + 1);
            for r in &t.records {
                prop_assert!(r.tiktok_users <= p.user_ceiling());
                for m in Metric::ALL {
                    prop_assert!(r.get(m) >= 0.0);
                }
                let ages = r.users_under_25 + r.users_25_to_34 + r.users_over_35;
                prop_assert!(close(ages, r.tiktok_users));
            }
        }
    }
}
