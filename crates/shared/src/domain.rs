use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

id_newtype!(EntityId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    Speed,
}

impl StatKey {
    pub const ALL: [StatKey; 4] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::Speed,
    ];

    /// Stat name as it appears in the remote stat list.
    pub fn api_name(self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::Attack => "attack",
            StatKey::Defense => "defense",
            StatKey::Speed => "speed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl EntityStats {
    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::Speed => self.speed,
        }
    }

    pub fn set(&mut self, key: StatKey, value: u32) {
        match key {
            StatKey::Hp => self.hp = value,
            StatKey::Attack => self.attack = value,
            StatKey::Defense => self.defense = value,
            StatKey::Speed => self.speed = value,
        }
    }
}

/// Flat, display-ready record produced from one remote lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntity {
    pub id: EntityId,
    pub name: String,
    /// Empty when the source carried no usable sprite.
    pub sprite_url: String,
    pub types: Vec<String>,
    /// Metres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub abilities: Vec<String>,
    pub stats: EntityStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_keys_round_trip_through_accessors() {
        let mut stats = EntityStats::default();
        for (value, key) in StatKey::ALL.into_iter().enumerate() {
            stats.set(key, value as u32 * 10);
        }
        assert_eq!(stats.get(StatKey::Hp), 0);
        assert_eq!(stats.get(StatKey::Attack), 10);
        assert_eq!(stats.get(StatKey::Defense), 20);
        assert_eq!(stats.get(StatKey::Speed), 30);
    }

    #[test]
    fn api_names_match_remote_stat_names() {
        let names: Vec<_> = StatKey::ALL.iter().map(|key| key.api_name()).collect();
        assert_eq!(names, ["hp", "attack", "defense", "speed"]);
    }
}
