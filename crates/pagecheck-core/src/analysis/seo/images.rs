use super::{ParsedPage, SignalExtractor};
use crate::analysis::round_to;
use lazy_static::lazy_static;
use scraper::Selector;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref IMG: Selector = Selector::parse("img").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub total_images: usize,
    pub images_with_alt: usize,
    pub images_without_alt: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_percentage: Option<f64>,
    pub issues: Vec<String>,
    pub score: u32,
}

pub struct ImageExtractor;

impl SignalExtractor for ImageExtractor {
    type Output = ImageAnalysis;

    fn extract(&self, page: &ParsedPage<'_>) -> ImageAnalysis {
        let mut total_images = 0;
        let mut images_with_alt = 0;

        for img in page.document.select(&IMG) {
            total_images += 1;
            if img.value().attr("alt").is_some_and(|alt| !alt.trim().is_empty()) {
                images_with_alt += 1;
            }
        }

        if total_images == 0 {
            return ImageAnalysis {
                total_images: 0,
                images_with_alt: 0,
                images_without_alt: 0,
                alt_percentage: None,
                issues: vec!["No images found".to_string()],
                score: 100,
            };
        }

        let images_without_alt = total_images - images_with_alt;
        let percentage = images_with_alt as f64 / total_images as f64 * 100.0;

        let mut issues = Vec::new();
        if images_without_alt > 0 {
            issues.push(format!("{} images missing alt text", images_without_alt));
        }

        ImageAnalysis {
            total_images,
            images_with_alt,
            images_without_alt,
            alt_percentage: Some(round_to(percentage, 1)),
            issues,
            score: percentage.round_ties_even() as u32,
        }
    }
}
