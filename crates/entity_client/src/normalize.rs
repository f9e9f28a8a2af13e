//! Mapping from the remote wire shape to [`NormalizedEntity`].
//!
//! Every accessor here defaults instead of failing: once a payload has
//! deserialized, normalization cannot error.

use shared::{
    domain::{EntityId, EntityStats, NormalizedEntity, StatKey},
    protocol::{RawEntity, RawSprites, RawStat, OFFICIAL_ARTWORK_KEY},
};

/// Replaces every hyphen with a space and uppercases the first character only.
pub fn display_case(raw: &str) -> String {
    let spaced = raw.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Official artwork first, then the default sprite, else an empty string.
pub fn select_sprite(sprites: &RawSprites) -> String {
    let artwork = sprites
        .other
        .as_ref()
        .and_then(|other| other.get(OFFICIAL_ARTWORK_KEY))
        .and_then(|sprite| sprite.as_ref())
        .and_then(|sprite| non_empty(sprite.front_default.as_deref()));

    artwork
        .or_else(|| non_empty(sprites.front_default.as_deref()))
        .unwrap_or_default()
        .to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

pub fn stat_value(stats: &[RawStat], key: StatKey) -> u32 {
    stats
        .iter()
        .find(|stat| stat.stat.name == key.api_name())
        .map(|stat| stat.base_stat)
        .unwrap_or(0)
}

/// Remote measurements are integers in tenths (decimetres, hectograms).
pub fn scale_tenths(units: u32) -> f64 {
    f64::from(units) / 10.0
}

pub fn normalize(raw: RawEntity) -> NormalizedEntity {
    let mut stats = EntityStats::default();
    for key in StatKey::ALL {
        stats.set(key, stat_value(&raw.stats, key));
    }

    NormalizedEntity {
        id: EntityId(raw.id),
        name: display_case(&raw.name),
        sprite_url: select_sprite(&raw.sprites),
        types: raw.types.into_iter().map(|slot| slot.kind.name).collect(),
        height: scale_tenths(raw.height),
        weight: scale_tenths(raw.weight),
        abilities: raw
            .abilities
            .iter()
            .map(|slot| display_case(&slot.ability.name))
            .collect(),
        stats,
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
