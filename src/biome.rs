use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Plains,
    Forest,
    Desert,
    Water,
    River,
    Mountains,
    Snow,
    Entrance,
}

/// Everything the map needs to know about a biome, kept in one table so the
/// color and the river rules can never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeProperties {
    pub name: &'static str,
    pub color: [f32; 3],
    pub glyph: char,
    /// Rivers flow through these tiles without repainting them.
    pub blocks_rivers: bool,
}

const PLAINS: BiomeProperties = BiomeProperties {
    name: "Plains",
    color: [0.2, 0.8, 0.2],
    glyph: ',',
    blocks_rivers: false,
};

const FOREST: BiomeProperties = BiomeProperties {
    name: "Forest",
    color: [0.0, 0.6, 0.0],
    glyph: '♣',
    blocks_rivers: false,
};

const DESERT: BiomeProperties = BiomeProperties {
    name: "Desert",
    color: [0.9, 0.8, 0.3],
    glyph: '=',
    blocks_rivers: false,
};

const WATER: BiomeProperties = BiomeProperties {
    name: "Water",
    color: [0.1, 0.3, 0.8],
    glyph: '≈',
    blocks_rivers: true,
};

const RIVER: BiomeProperties = BiomeProperties {
    name: "River",
    color: [0.4, 0.6, 1.0],
    glyph: '~',
    blocks_rivers: false,
};

const MOUNTAINS: BiomeProperties = BiomeProperties {
    name: "Mountains",
    color: [0.4, 0.4, 0.4],
    glyph: '▲',
    blocks_rivers: true,
};

const SNOW: BiomeProperties = BiomeProperties {
    name: "Snow",
    color: [0.9, 0.9, 1.0],
    glyph: '△',
    blocks_rivers: true,
};

const ENTRANCE: BiomeProperties = BiomeProperties {
    name: "Entrance",
    color: [0.5, 0.0, 0.5],
    glyph: 'E',
    blocks_rivers: false,
};

impl Biome {
    pub const COUNT: usize = 8;

    pub const ALL: [Biome; Biome::COUNT] = [
        Biome::Plains,
        Biome::Forest,
        Biome::Desert,
        Biome::Water,
        Biome::River,
        Biome::Mountains,
        Biome::Snow,
        Biome::Entrance,
    ];

    pub fn properties(self) -> &'static BiomeProperties {
        match self {
            Biome::Plains => &PLAINS,
            Biome::Forest => &FOREST,
            Biome::Desert => &DESERT,
            Biome::Water => &WATER,
            Biome::River => &RIVER,
            Biome::Mountains => &MOUNTAINS,
            Biome::Snow => &SNOW,
            Biome::Entrance => &ENTRANCE,
        }
    }

    pub fn color(self) -> [f32; 3] {
        self.properties().color
    }

    /// Color as 8-bit RGB for image export.
    pub fn rgb8(self) -> [u8; 3] {
        self.color().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn glyph(self) -> char {
        self.properties().glyph
    }

    pub fn name(self) -> &'static str {
        self.properties().name
    }

    pub fn blocks_rivers(self) -> bool {
        self.properties().blocks_rivers
    }

    /// Position in [`Biome::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Picks a biome from the three climate values. Rules are checked in order
/// and the first match wins.
pub fn classify(elevation: f64, moisture: f64, temperature: f64) -> Biome {
    // High peaks, snow capped when cold
    if elevation > 0.75 {
        return if temperature < 0.3 {
            Biome::Snow
        } else {
            Biome::Mountains
        };
    }

    if elevation < 0.15 {
        return Biome::Water;
    }

    // Wet lowlands
    if elevation < 0.25 && moisture > 0.7 {
        return Biome::River;
    }

    if elevation > 0.4 && elevation < 0.75 && moisture > 0.4 {
        return Biome::Forest;
    }

    if moisture < 0.3 && elevation < 0.6 {
        return Biome::Desert;
    }

    Biome::Plains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rule_boundaries() {
        assert_eq!(classify(0.8, 0.5, 0.2), Biome::Snow);
        assert_eq!(classify(0.8, 0.5, 0.5), Biome::Mountains);
        assert_eq!(classify(0.1, 0.0, 0.5), Biome::Water);
        assert_eq!(classify(0.1, 1.0, 0.5), Biome::Water);
        assert_eq!(classify(0.2, 0.8, 0.5), Biome::River);
        assert_eq!(classify(0.5, 0.5, 0.5), Biome::Forest);
        assert_eq!(classify(0.5, 0.1, 0.5), Biome::Desert);
        assert_eq!(classify(0.5, 0.35, 0.5), Biome::Plains);
    }

    #[test]
    fn test_classify_priority_order() {
        // Dry peaks are still mountains, not desert
        assert_eq!(classify(0.9, 0.0, 0.9), Biome::Mountains);
        // Exactly 0.75 is not a peak and not forest either
        assert_eq!(classify(0.75, 0.9, 0.0), Biome::Plains);
        // Dry lowland above the water line is desert
        assert_eq!(classify(0.2, 0.1, 0.5), Biome::Desert);
        // Dry highland below the peaks falls through to plains
        assert_eq!(classify(0.65, 0.1, 0.5), Biome::Plains);
    }

    #[test]
    fn test_classify_never_places_entrance() {
        for e in 0..=20 {
            for m in 0..=20 {
                for t in [0.0, 0.29, 0.3, 1.0] {
                    let biome = classify(e as f64 / 20.0, m as f64 / 20.0, t);
                    assert_ne!(biome, Biome::Entrance);
                }
            }
        }
    }

    #[test]
    fn test_color_table() {
        assert_eq!(Biome::Plains.color(), [0.2, 0.8, 0.2]);
        assert_eq!(Biome::Water.color(), [0.1, 0.3, 0.8]);
        assert_eq!(Biome::Entrance.color(), [0.5, 0.0, 0.5]);
        assert_eq!(Biome::Entrance.rgb8(), [128, 0, 128]);
        for biome in Biome::ALL {
            assert!(biome.color().iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_river_barriers() {
        let barriers: Vec<_> = Biome::ALL.into_iter().filter(|b| b.blocks_rivers()).collect();
        assert_eq!(barriers, vec![Biome::Water, Biome::Mountains, Biome::Snow]);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, biome) in Biome::ALL.into_iter().enumerate() {
            assert_eq!(biome.index(), i);
        }
    }
}
