//! Conversion of DLK annotation records into COCO annotations.

use std::io;

use crate::coco::{round2, Annotation, CategoryRegistry};
use crate::types::{Contour, DlkRecord, RoiConfig};

/// Convert all labeled objects of one record into COCO annotations.
///
/// DLK bounding boxes are stored relative to the configured ROI and contour
/// points relative to their bounding box, so both are shifted back into
/// full-image coordinates here.
pub fn convert_record(
    record: &DlkRecord,
    image_id: u32,
    image_width: u32,
    image_height: u32,
    roi_config: &RoiConfig,
    categories: &mut CategoryRegistry,
    next_annotation_id: &mut u32,
) -> io::Result<Vec<Annotation>> {
    let roi = roi_config.to_pixel_roi(image_width, image_height);
    let mut annotations = Vec::with_capacity(record.objects.len());

    for object in &record.objects {
        if object.label.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Labeled object has an empty class label",
            ));
        }
        let category_id = categories.id_for(&object.label);

        let [bx, by, bw, bh] = object.bndbox;
        let x = bx + roi.x;
        let y = by + roi.y;

        // Segmentation uses the unrounded bbox origin; only the serialized
        // bbox is rounded.
        let segmentation = offset_contours(&object.contours, x, y);
        let bbox = [round2(x), round2(y), round2(bw), round2(bh)];
        let area = round2(bw * bh);

        let id = *next_annotation_id;
        *next_annotation_id += 1;
        annotations.push(Annotation::new(
            id,
            image_id,
            category_id,
            bbox,
            area,
            0,
            segmentation,
        ));
    }

    Ok(annotations)
}

/// Flatten contours into COCO segmentation polygons, shifting each point by
/// the bounding-box origin. Points that are not coordinate pairs and contours
/// that end up empty are dropped.
fn offset_contours(contours: &[Contour], x: f64, y: f64) -> Vec<Vec<f64>> {
    let mut segmentation = Vec::new();
    for contour in contours {
        let mut flat = Vec::with_capacity(contour.len() * 2);
        for point in contour {
            if let Some(pair) = point.first() {
                if pair.len() == 2 {
                    flat.push(pair[0] + x);
                    flat.push(pair[1] + y);
                }
            }
        }
        if !flat.is_empty() {
            segmentation.push(flat);
        }
    }
    segmentation
}
