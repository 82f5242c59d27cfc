//! Image sequencing for project galleries.

use crate::domain::ProjectImage;
use crate::domain::views::GalleryImage;

/// Sort a project's gallery ascending by `display_order`. Equal keys keep
/// their fetch order. Missing alt text becomes "{project title} screenshot".
pub fn sequence(images: &[ProjectImage], project_title: &str) -> Vec<GalleryImage> {
    let mut ordered: Vec<&ProjectImage> = images.iter().collect();
    // `sort_by_key` is stable.
    ordered.sort_by_key(|img| img.display_order);
    ordered
        .into_iter()
        .map(|img| GalleryImage {
            id: img.id.clone(),
            url: img.image_url.clone(),
            alt: img
                .image_alt
                .clone()
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| format!("{} screenshot", project_title)),
            display_order: img.display_order,
        })
        .collect()
}
