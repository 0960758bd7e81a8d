//! Reputation tiers derived from cumulative deed count.

/// A named reputation rank with its deed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub level: u32,
    pub name: &'static str,
    pub min_deeds: u32,
}

/// Threshold table, ordered by `min_deeds` ascending.
pub const TIERS: [Tier; 11] = [
    Tier { level: 1, name: "First Spark", min_deeds: 0 },
    Tier { level: 2, name: "Kind Starter", min_deeds: 5 },
    Tier { level: 3, name: "Helper", min_deeds: 25 },
    Tier { level: 4, name: "Neighbor", min_deeds: 50 },
    Tier { level: 5, name: "Community Friend", min_deeds: 100 },
    Tier { level: 6, name: "Giver", min_deeds: 200 },
    Tier { level: 7, name: "Uplifter", min_deeds: 300 },
    Tier { level: 8, name: "City Light", min_deeds: 1_000 },
    Tier { level: 9, name: "Beacon", min_deeds: 25_000 },
    Tier { level: 10, name: "Kindness Icon", min_deeds: 1_000_000 },
    Tier { level: 11, name: "Eternal Deedsie", min_deeds: 2_000_000 },
];

/// The tier every new profile starts at.
pub fn first() -> &'static Tier {
    &TIERS[0]
}

/// Highest tier whose threshold is <= `total_deeds`.
pub fn tier_for_deeds(total_deeds: u32) -> &'static Tier {
    TIERS
        .iter()
        .rev()
        .find(|tier| total_deeds >= tier.min_deeds)
        .unwrap_or(&TIERS[0])
}
