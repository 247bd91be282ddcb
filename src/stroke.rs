use egui::{Color32, Pos2};

use crate::command::CommandId;
use crate::surface::Surface;

/// A freehand marker line.
///
/// Points are kept in drawing order. Thickness and color are captured from
/// the active tool when the stroke is started and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: CommandId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    /// Start a stroke at `start`.
    pub fn new(start: Pos2, thickness: f32, color: Color32) -> Self {
        Self::from_points(vec![start], thickness, color)
    }

    pub fn from_points(points: Vec<Pos2>, thickness: f32, color: Color32) -> Self {
        Self {
            id: CommandId::new(),
            points,
            color,
            thickness,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Extend the line. Off-surface points are kept; the surface clips them.
    pub fn append(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Whether rendering this stroke leaves a mark at all.
    pub fn is_visible(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.is_visible() {
            return;
        }
        surface.polyline(&self.points, self.thickness, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use egui::pos2;

    #[test]
    fn single_point_renders_nothing() {
        let stroke = Stroke::new(pos2(4.0, 4.0), 2.0, Color32::RED);
        let mut surface = RecordingSurface::default();
        stroke.render(&mut surface);
        assert!(surface.ops().is_empty());
        assert!(!stroke.is_visible());
    }

    #[test]
    fn polyline_passes_through_every_point_in_order() {
        let mut stroke = Stroke::new(pos2(0.0, 0.0), 5.0, Color32::BLUE);
        stroke.append(pos2(10.0, 0.0));
        stroke.append(pos2(10.0, 10.0));

        let mut surface = RecordingSurface::default();
        stroke.render(&mut surface);

        assert_eq!(
            surface.ops(),
            &[DrawOp::Polyline {
                points: vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0)],
                thickness: 5.0,
                color: Color32::BLUE,
            }]
        );
    }

    #[test]
    fn off_surface_points_are_kept() {
        let mut stroke = Stroke::new(pos2(-20.0, 5.0), 2.0, Color32::BLACK);
        stroke.append(pos2(9000.0, -3.0));
        assert_eq!(stroke.points().len(), 2);
    }
}
