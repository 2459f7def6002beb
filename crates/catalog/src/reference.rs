use crate::{AssetDescriptor, Catalog};

const ASSET_BASE_URL: &str = "https://assets.assetmatch.dev/models";

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
}

const REFERENCE_SEEDS: [Seed; 6] = [
    Seed {
        id: "astronaut",
        name: "Astronaut",
        description: "A detailed 3D model of an astronaut in a space suit, perfect for space-themed scenes or educational content about space exploration.",
        tags: &["astronaut", "space", "suit", "helmet", "cosmonaut", "spaceman", "nasa", "rocket", "moon", "mars"],
    },
    Seed {
        id: "chair",
        name: "Wooden Chair",
        description: "A classic wooden chair with traditional design, suitable for dining rooms, offices, or any indoor setting.",
        tags: &["chair", "wooden", "furniture", "seat", "dining", "office", "table", "desk", "wood", "traditional"],
    },
    Seed {
        id: "vase",
        name: "Modern Vase",
        description: "A sleek, modern vase with clean lines and contemporary design, perfect for displaying flowers or as a decorative piece.",
        tags: &["vase", "modern", "decorative", "flowers", "ceramic", "glass", "contemporary", "design", "interior", "decoration"],
    },
    Seed {
        id: "apple",
        name: "Red Apple",
        description: "A realistic red apple with natural texture and shine, ideal for still life scenes, educational content, or food-related applications.",
        tags: &["apple", "red", "fruit", "food", "fresh", "healthy", "natural", "shiny", "round", "organic"],
    },
    Seed {
        id: "table",
        name: "Wooden Table",
        description: "A sturdy wooden table with natural grain texture, suitable for dining, work, or as a surface for various objects.",
        tags: &["table", "wooden", "furniture", "dining", "work", "surface", "wood", "sturdy", "natural", "grain"],
    },
    Seed {
        id: "lamp",
        name: "Desk Lamp",
        description: "A modern desk lamp with adjustable arm and LED lighting, perfect for office spaces or study areas.",
        tags: &["lamp", "desk", "light", "modern", "office", "study", "led", "adjustable", "illumination", "work"],
    },
];

impl Catalog {
    /// The built-in six-entry catalog (astronaut, chair, vase, apple, table, lamp).
    ///
    /// Every entry points at its own placeholder `.glb` URL so a match is observable from
    /// the URL alone.
    pub fn reference() -> Self {
        let entries = REFERENCE_SEEDS
            .iter()
            .map(|seed| AssetDescriptor {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                url: format!("{ASSET_BASE_URL}/{}.glb", seed.id),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            })
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reference_catalog_passes_validation() {
        let reference = Catalog::reference();
        let rebuilt = Catalog::new(reference.entries().to_vec()).expect("valid catalog");
        assert_eq!(rebuilt, reference);
    }

    #[test]
    fn reference_catalog_order() {
        let catalog = Catalog::reference();
        let ids: Vec<&str> = catalog
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["astronaut", "chair", "vase", "apple", "table", "lamp"]);
    }

    #[test]
    fn reference_urls_are_distinct() {
        let catalog = Catalog::reference();
        let urls: HashSet<&str> = catalog.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls.len(), catalog.len());
    }
}
