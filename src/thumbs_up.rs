use crate::landmarks::{Landmark, LandmarkSnapshot};

/// Thumb raised and the other four fingers curled.
///
/// Y grows downwards, so a raised thumb has its tip at a smaller y than its
/// base knuckle, and a curled finger has its tip below (larger y than) its
/// PIP joint.
pub fn is_thumbs_up(snapshot: &LandmarkSnapshot, thumb_rise_min: f32) -> bool {
    let thumb_tip = snapshot.get(Landmark::ThumbTip);
    let thumb_mcp = snapshot.get(Landmark::ThumbMcp);
    if thumb_mcp.y - thumb_tip.y < thumb_rise_min {
        return false;
    }

    Landmark::finger_tip_pip_pairs()
        .iter()
        .all(|&(tip, pip)| snapshot.get(tip).y > snapshot.get(pip).y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{LANDMARK_COUNT, Point3D};
    use std::time::Duration;

    fn set_y(points: &mut [Point3D; LANDMARK_COUNT], landmark: Landmark, y: f32) {
        points[landmark.index()].y = y;
    }

    fn thumbs_up_points() -> [Point3D; LANDMARK_COUNT] {
        let mut points = [Point3D::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        set_y(&mut points, Landmark::ThumbTip, 0.30);
        set_y(&mut points, Landmark::ThumbMcp, 0.40);
        for (tip, pip) in Landmark::finger_tip_pip_pairs() {
            set_y(&mut points, pip, 0.50);
            set_y(&mut points, tip, 0.55);
        }
        points
    }

    fn snapshot(points: [Point3D; LANDMARK_COUNT]) -> LandmarkSnapshot {
        LandmarkSnapshot::new(points, Duration::ZERO)
    }

    #[test]
    fn test_thumbs_up_pose() {
        assert!(is_thumbs_up(&snapshot(thumbs_up_points()), 0.08));
    }

    #[test]
    fn test_thumb_not_high_enough() {
        let mut points = thumbs_up_points();
        set_y(&mut points, Landmark::ThumbTip, 0.35);
        assert!(!is_thumbs_up(&snapshot(points), 0.08));
    }

    #[test]
    fn test_thumb_pointing_down() {
        let mut points = thumbs_up_points();
        set_y(&mut points, Landmark::ThumbTip, 0.60);
        assert!(!is_thumbs_up(&snapshot(points), 0.08));
    }

    #[test]
    fn test_any_extended_finger_blocks() {
        for (tip, _) in Landmark::finger_tip_pip_pairs() {
            let mut points = thumbs_up_points();
            set_y(&mut points, tip, 0.30);
            assert!(!is_thumbs_up(&snapshot(points), 0.08), "{:?} extended", tip);
        }
    }

    #[test]
    fn test_tip_level_with_pip_is_not_curled() {
        let mut points = thumbs_up_points();
        set_y(&mut points, Landmark::RingTip, 0.50);
        assert!(!is_thumbs_up(&snapshot(points), 0.08));
    }
}
