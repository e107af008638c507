//! Synthetic landmark sets for the unit tests.

use crate::landmarks::{Landmarks, Point};

/// Mouth points 48..=67 of a face mirrored around x = 50.
#[rustfmt::skip]
const MOUTH: [(i64, i64); 20] = [
    (35, 80), (40, 76), (45, 74), (50, 75), (55, 74), (60, 76), (65, 80),
    (60, 85), (55, 87), (50, 88), (45, 87), (40, 85),
    (38, 80), (44, 78), (50, 78), (56, 78), (62, 80),
    (56, 82), (50, 83), (44, 82),
];

/// Points on the image-right half of the mouth.
const RIGHT_HALF: [usize; 8] = [52, 53, 54, 55, 56, 63, 64, 65];

/// Level eyes, nose bridge on the midline, and a mouth whose image-right half
/// is pushed `droop` pixels away from the midline.
pub fn face_points(droop: i64) -> Landmarks {
    let mut points: Vec<Point> = (0..68).map(|i| Point::new(50, i)).collect();
    points[27] = Point::new(50, 40);
    points[36] = Point::new(30, 40);
    points[39] = Point::new(42, 40);
    points[42] = Point::new(58, 40);
    points[45] = Point::new(70, 40);
    for (i, &(x, y)) in MOUTH.iter().enumerate() {
        points[48 + i] = Point::new(x, y);
    }
    for i in RIGHT_HALF {
        points[i].x += droop;
    }
    Landmarks::new(points).unwrap()
}
