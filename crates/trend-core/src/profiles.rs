//! Built-in country table and name resolution with a guaranteed fallback.

use crate::{validate_profile, CountryProfile, MarketType, ValidationError};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Key of the fallback profile.
pub const DEFAULT_PROFILE_KEY: &str = "default";

/// Country substituted when an interactive selection is invalid.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Countries offered by the interactive menu, in display order.
pub const MENU_COUNTRIES: [&str; 15] = [
    "United States",
    "China",
    "India",
    "Brazil",
    "Indonesia",
    "Russia",
    "Mexico",
    "Vietnam",
    "Philippines",
    "Thailand",
    "United Kingdom",
    "France",
    "Germany",
    "Japan",
    "South Korea",
];

struct Seed {
    name: &'static str,
    population: f64,
    users: f64,
    market: MarketType,
    specialties: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        name: "United States",
        population: 331_000_000.0,
        users: 100_000_000.0,
        market: MarketType::Mature,
        specialties: &["entertainment", "influencers", "business", "ads", "music"],
    },
    Seed {
        name: "China",
        population: 1_400_000_000.0,
        users: 600_000_000.0,
        market: MarketType::Domestic,
        specialties: &["e-commerce", "live-streaming", "education", "government"],
    },
    Seed {
        name: "India",
        population: 1_380_000_000.0,
        users: 200_000_000.0,
        market: MarketType::Emerging,
        specialties: &["entertainment", "music", "dance", "regional_content"],
    },
    Seed {
        name: "Brazil",
        population: 213_000_000.0,
        users: 82_000_000.0,
        market: MarketType::Growing,
        specialties: &["music", "dance", "comedy", "social_causes"],
    },
    Seed {
        name: "Indonesia",
        population: 274_000_000.0,
        users: 99_000_000.0,
        market: MarketType::Growing,
        specialties: &["islamic_content", "comedy", "local_business", "education"],
    },
    Seed {
        name: "Russia",
        population: 144_000_000.0,
        users: 50_000_000.0,
        market: MarketType::Regulated,
        specialties: &["politics", "comedy", "challenges", "music"],
    },
    Seed {
        name: "Mexico",
        population: 128_000_000.0,
        users: 57_500_000.0,
        market: MarketType::Growing,
        specialties: &["music", "comedy", "beauty", "family_content"],
    },
    Seed {
        name: "Vietnam",
        population: 97_300_000.0,
        users: 50_000_000.0,
        market: MarketType::Booming,
        specialties: &["music", "dance", "comedy", "educational"],
    },
    Seed {
        name: "Philippines",
        population: 110_000_000.0,
        users: 43_500_000.0,
        market: MarketType::Booming,
        specialties: &["dance", "comedy", "family_content", "challenges"],
    },
    Seed {
        name: "Thailand",
        population: 70_000_000.0,
        users: 40_000_000.0,
        market: MarketType::Mature,
        specialties: &["beauty", "comedy", "food", "music"],
    },
    Seed {
        name: "United Kingdom",
        population: 67_000_000.0,
        users: 23_000_000.0,
        market: MarketType::Mature,
        specialties: &["comedy", "politics", "business", "education"],
    },
    Seed {
        name: "France",
        population: 68_000_000.0,
        users: 24_000_000.0,
        market: MarketType::Mature,
        specialties: &["humor", "politics", "culture", "fashion"],
    },
    Seed {
        name: "Germany",
        population: 83_000_000.0,
        users: 22_000_000.0,
        market: MarketType::Growing,
        specialties: &["comedy", "education", "politics", "business"],
    },
    Seed {
        name: "Japan",
        population: 126_000_000.0,
        users: 17_000_000.0,
        market: MarketType::Emerging,
        specialties: &["anime", "music", "beauty", "comedy"],
    },
    Seed {
        name: "South Korea",
        population: 52_000_000.0,
        users: 15_000_000.0,
        market: MarketType::Growing,
        specialties: &["k-pop", "beauty", "fashion", "dance"],
    },
];

const DEFAULT_SEED: Seed = Seed {
    name: DEFAULT_PROFILE_KEY,
    population: 50_000_000.0,
    users: 10_000_000.0,
    market: MarketType::Emerging,
    specialties: &["entertainment", "music", "comedy"],
};

impl Seed {
    fn to_profile(&self) -> CountryProfile {
        CountryProfile {
            name: self.name.to_string(),
            population_base: self.population,
            tiktok_users_base: self.users,
            market_type: self.market,
            specialties: self.specialties.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Name-keyed profile table. Lookups never fail: unknown names fall back to
/// the `default` profile.
#[derive(Clone, Debug)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, CountryProfile>,
    fallback: CountryProfile,
}

impl ProfileRegistry {
    /// Registry holding only the built-in table.
    pub fn builtin() -> Self {
        let profiles = SEEDS
            .iter()
            .map(|s| (s.name.to_string(), s.to_profile()))
            .collect();
        Self {
            profiles,
            fallback: DEFAULT_SEED.to_profile(),
        }
    }

    /// Profile for `name`, or the fallback profile when unknown.
    pub fn resolve(&self, name: &str) -> &CountryProfile {
        match self.profiles.get(name) {
            Some(p) => p,
            None => {
                if name != DEFAULT_PROFILE_KEY {
                    debug!(country = name, "unknown country, using default profile");
                }
                &self.fallback
            }
        }
    }

    /// Whether `name` has its own entry (the fallback does not count).
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// The fallback profile.
    pub fn fallback(&self) -> &CountryProfile {
        &self.fallback
    }

    /// Known country names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Add or replace profiles by name. A profile named `default` replaces
    /// the fallback. Nothing is merged unless every profile validates.
    pub fn merge(&mut self, incoming: Vec<CountryProfile>) -> Result<(), ValidationError> {
        for p in &incoming {
            validate_profile(p)?;
        }
        for p in incoming {
            debug!(country = %p.name, market = %p.market_type, "registering profile");
            if p.name == DEFAULT_PROFILE_KEY {
                self.fallback = p;
            } else {
                self.profiles.insert(p.name.clone(), p);
            }
        }
        Ok(())
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN: Lazy<ProfileRegistry> = Lazy::new(ProfileRegistry::builtin);

/// Shared read-only registry of the built-in table.
pub fn builtin_registry() -> &'static ProfileRegistry {
    &BUILTIN
}

#[derive(Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: Vec<CountryProfile>,
}

/// Parse a YAML profile document of the form `profiles: [ ... ]`.
/// Each profile is validated before being returned.
pub fn load_profiles_yaml(text: &str) -> Result<Vec<CountryProfile>, ValidationError> {
    let file: ProfileFile =
        serde_yaml::from_str(text).map_err(|e| ValidationError::Parse(e.to_string()))?;
    for p in &file.profiles {
        validate_profile(p)?;
    }
    Ok(file.profiles)
}
