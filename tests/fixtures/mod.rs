//! Shared test fixtures: descriptor builders for a Loupedeck-style deck.

#![allow(dead_code)]

use deckbench::models::{BackgroundSpec, DeckDescriptor, ElementKind, FamilySpec};

/// A full deck model: 3x2 key grid, an encoder bank, round keys, a pair of
/// side screens, one slider and one label.
pub fn full_descriptor() -> DeckDescriptor {
    DeckDescriptor {
        name: "virtual-live".to_string(),
        background: BackgroundSpec {
            image: "background.png".to_string(),
            color: Some("#1e1e28".to_string()),
            spacing: [4, 4],
            offset: [80, 10],
        },
        families: vec![
            FamilySpec {
                kind: ElementKind::Key,
                name: "k".to_string(),
                cell: [72, 72],
                grid: [3, 2],
                spacing: None,
                offset: None,
                corner_radius: 8,
            },
            FamilySpec {
                kind: ElementKind::Encoder,
                name: "e".to_string(),
                cell: [48, 48],
                grid: [1, 3],
                spacing: Some([8, 8]),
                offset: Some([16, 16]),
                corner_radius: 0,
            },
            FamilySpec {
                kind: ElementKind::RoundKey,
                name: "b".to_string(),
                cell: [40, 40],
                grid: [2, 1],
                spacing: Some([6, 6]),
                offset: Some([90, 180]),
                corner_radius: 0,
            },
            FamilySpec {
                kind: ElementKind::Touchscreen,
                name: "left".to_string(),
                cell: [60, 148],
                grid: [1, 1],
                spacing: Some([0, 0]),
                offset: Some([330, 10]),
                corner_radius: 4,
            },
            FamilySpec {
                kind: ElementKind::Touchscreen,
                name: "right".to_string(),
                cell: [60, 148],
                grid: [1, 1],
                spacing: Some([0, 0]),
                offset: Some([400, 10]),
                corner_radius: 4,
            },
            FamilySpec {
                kind: ElementKind::Slider,
                name: "fader".to_string(),
                cell: [24, 148],
                grid: [1, 1],
                spacing: Some([0, 0]),
                offset: Some([470, 10]),
                corner_radius: 0,
            },
            FamilySpec {
                kind: ElementKind::Label,
                name: "title".to_string(),
                cell: [120, 16],
                grid: [1, 1],
                spacing: Some([0, 0]),
                offset: Some([80, 230]),
                corner_radius: 0,
            },
        ],
    }
}

/// Total number of controls the full descriptor declares.
pub fn full_descriptor_element_count() -> usize {
    // 6 keys + 3 encoders + 2 round keys + 2 side screens + 1 slider + 1 label
    15
}

/// A minimal key-grid-only descriptor.
pub fn grid_descriptor() -> DeckDescriptor {
    DeckDescriptor {
        name: "mini".to_string(),
        background: BackgroundSpec {
            image: "background.png".to_string(),
            color: None,
            spacing: [4, 4],
            offset: [10, 10],
        },
        families: vec![FamilySpec {
            kind: ElementKind::Key,
            name: "k".to_string(),
            cell: [72, 72],
            grid: [3, 2],
            spacing: None,
            offset: None,
            corner_radius: 8,
        }],
    }
}

/// 1x1 red PNG, the smallest useful key-image payload.
pub const RED_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x08, 0xd7, 0x63, 0xf8,
    0xcf, 0xc0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0x18, 0xdd, 0x8d, 0xb0, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];
