//! COCO format data structures and utilities
//!
//! This module provides the COCO tables (`images`, `annotations`, `categories`)
//! written by the converter, plus the bookkeeping for category IDs.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// COCO dataset information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub year: u32,
    pub version: String,
    pub description: String,
    pub contributor: String,
    pub url: String,
    pub date_created: String,
}

impl Default for Info {
    fn default() -> Self {
        let today = chrono::Utc::now().date_naive();
        Self {
            year: today.year() as u32,
            version: "1.0".to_string(),
            description: "Converted dataset to COCO format from Mech-Mind DLK format.".to_string(),
            contributor: "SuperbAI".to_string(),
            url: String::new(),
            date_created: today.to_string(),
        }
    }
}

/// COCO license information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub id: u32,
    pub name: String,
    pub url: String,
}

impl Default for License {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Default License".to_string(),
            url: String::new(),
        }
    }
}

/// COCO category information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub supercategory: String,
}

/// COCO image information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: u32,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub license: u32,
    pub date_captured: String,
}

impl Image {
    pub fn new(id: u32, file_name: String, width: u32, height: u32) -> Self {
        Self {
            id,
            file_name,
            width,
            height,
            license: 1,
            date_captured: String::new(),
        }
    }
}

/// COCO annotation information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u32,
    pub image_id: u32,
    pub category_id: u32,
    pub bbox: [f64; 4], // [x, y, width, height]
    pub area: f64,
    pub iscrowd: u32,
    pub segmentation: Vec<Vec<f64>>,
}

impl Annotation {
    pub fn new(
        id: u32,
        image_id: u32,
        category_id: u32,
        bbox: [f64; 4],
        area: f64,
        iscrowd: u32,
        segmentation: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            id,
            image_id,
            category_id,
            bbox,
            area,
            iscrowd,
            segmentation,
        }
    }
}

/// Complete COCO dataset structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CocoFile {
    pub info: Info,
    pub licenses: Vec<License>,
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<Category>,
}

impl Default for CocoFile {
    fn default() -> Self {
        Self {
            info: Info::default(),
            licenses: vec![License::default()],
            images: Vec::new(),
            annotations: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Assigns category IDs in order of first appearance, 1-based as COCO expects.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl CategoryRegistry {
    /// Get the ID for a label, registering it if it has not been seen before.
    pub fn id_for(&mut self, label: &str) -> u32 {
        match self.names.iter().position(|name| name == label) {
            Some(index) => (index + 1) as u32,
            None => {
                self.names.push(label.to_string());
                self.names.len() as u32
            }
        }
    }

    /// Build the COCO categories table.
    pub fn into_categories(self) -> Vec<Category> {
        self.names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Category {
                id: (index + 1) as u32,
                name,
                supercategory: "object".to_string(),
            })
            .collect()
    }
}

/// Round to two decimal places, the precision used for serialized coordinates.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
