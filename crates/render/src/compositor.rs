//! Frame compositor: expresses one frame of the card as render operations.
//!
//! The operations are applied in order to each node by whatever layer
//! actually draws. The card and the blob's mask carry the same two
//! rotations so the light stays inside the card's outline.

use parallax_common::error::ParallaxResult;
use parallax_model::{Axis3, CardLayout, ContentMode, VisualState};
use serde::{Deserialize, Serialize};

/// The visual nodes of the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    /// The image card.
    Card,
    /// The soft light blob over the card.
    Blob,
}

/// RGBA color, components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// A rotation about an axis through the node's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub degrees: f64,
    pub axis: Axis3,
}

/// One render operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderOp {
    /// Image content sized to the card.
    Fill {
        width: f64,
        height: f64,
        content_mode: ContentMode,
    },
    /// Filled circle of the given diameter, centered on the node.
    Circle { diameter: f64, color: Rgba },
    /// Clip the node to a centered rounded rectangle.
    ClipRoundedRect {
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    /// Drop shadow behind the node.
    Shadow {
        color: Rgba,
        radius: f64,
        x: f64,
        y: f64,
    },
    /// 3D rotation with perspective.
    Rotate3d(Rotation),
    /// Gaussian blur.
    Blur { radius: f64 },
    /// Translate the node from its centered position.
    Offset { x: f64, y: f64 },
    /// Mask the node with a centered rounded rectangle that is itself
    /// rotated before masking.
    MaskRoundedRect {
        width: f64,
        height: f64,
        corner_radius: f64,
        rotations: Vec<Rotation>,
    },
}

/// Anything that can draw render operations onto visual nodes.
pub trait Compositor {
    /// Apply one operation to a node, after all previous operations on it.
    fn apply(&mut self, node: NodeId, op: &RenderOp) -> ParallaxResult<()>;

    /// Called once all operations of a frame have been applied.
    fn present(&mut self) -> ParallaxResult<()> {
        Ok(())
    }
}

/// A single frame's composition instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameComposition {
    /// The state the frame was composed from.
    pub state: VisualState,
    /// Operations on the card, in application order.
    pub card: Vec<RenderOp>,
    /// Operations on the blob, in application order.
    pub blob: Vec<RenderOp>,
}

impl FrameComposition {
    /// All operations, card first.
    pub fn ops(&self) -> impl Iterator<Item = (NodeId, &RenderOp)> {
        self.card
            .iter()
            .map(|op| (NodeId::Card, op))
            .chain(self.blob.iter().map(|op| (NodeId::Blob, op)))
    }

    /// Apply the frame to a compositor and present it.
    pub fn render_to(&self, compositor: &mut dyn Compositor) -> ParallaxResult<()> {
        for (node, op) in self.ops() {
            compositor.apply(node, op)?;
        }
        compositor.present()
    }
}

/// Compose one frame from a visual state.
pub fn compose(state: &VisualState, layout: &CardLayout) -> FrameComposition {
    let rotations = vec![
        Rotation {
            degrees: state.rotation_x_deg,
            axis: layout.pitch_axis,
        },
        Rotation {
            degrees: state.rotation_y_deg,
            axis: layout.roll_axis,
        },
    ];

    let mut card = vec![
        RenderOp::Fill {
            width: layout.card_size,
            height: layout.card_size,
            content_mode: layout.content_mode,
        },
        RenderOp::ClipRoundedRect {
            width: layout.card_size,
            height: layout.card_size,
            corner_radius: layout.corner_radius,
        },
        RenderOp::Shadow {
            color: Rgba::BLACK,
            radius: layout.shadow_radius,
            x: 0.0,
            y: 0.0,
        },
    ];
    card.extend(rotations.iter().copied().map(RenderOp::Rotate3d));

    let blob = vec![
        RenderOp::Circle {
            diameter: layout.blob_diameter,
            color: Rgba::WHITE.with_alpha(layout.blob_opacity),
        },
        RenderOp::Blur {
            radius: layout.blob_blur_radius,
        },
        RenderOp::Offset {
            x: state.blob_offset_x,
            y: state.blob_offset_y,
        },
        RenderOp::MaskRoundedRect {
            width: layout.card_size,
            height: layout.card_size,
            corner_radius: layout.corner_radius,
            rotations,
        },
    ];

    FrameComposition {
        state: *state,
        card,
        blob,
    }
}

/// Compositor that records every operation it receives.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<(NodeId, RenderOp)>,
    frames_presented: u64,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[(NodeId, RenderOp)] {
        &self.commands
    }

    /// Operations recorded for one node.
    pub fn for_node(&self, node: NodeId) -> Vec<&RenderOp> {
        self.commands
            .iter()
            .filter(|(n, _)| *n == node)
            .map(|(_, op)| op)
            .collect()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Compositor for CommandLog {
    fn apply(&mut self, node: NodeId, op: &RenderOp) -> ParallaxResult<()> {
        self.commands.push((node, op.clone()));
        Ok(())
    }

    fn present(&mut self) -> ParallaxResult<()> {
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tilted() -> VisualState {
        VisualState {
            rotation_x_deg: -2.5,
            rotation_y_deg: 7.0,
            blob_offset_x: 150.0,
            blob_offset_y: 16.0,
        }
    }

    #[test]
    fn test_card_ops_order() {
        let frame = compose(&tilted(), &CardLayout::default());
        assert_eq!(
            frame.card[0],
            RenderOp::Fill {
                width: 350.0,
                height: 350.0,
                content_mode: ContentMode::Fill,
            }
        );
        assert!(matches!(
            frame.card[1],
            RenderOp::ClipRoundedRect { width, corner_radius, .. } if width == 350.0 && corner_radius == 20.0
        ));
        assert!(matches!(frame.card[2], RenderOp::Shadow { radius, .. } if radius == 10.0));
        assert_eq!(
            frame.card[3],
            RenderOp::Rotate3d(Rotation {
                degrees: -2.5,
                axis: Axis3::new(1.0, 1.0, 0.0)
            })
        );
        assert_eq!(
            frame.card[4],
            RenderOp::Rotate3d(Rotation {
                degrees: 7.0,
                axis: Axis3::new(0.0, 1.0, 0.0)
            })
        );
    }

    #[test]
    fn test_blob_mask_follows_card_rotation() {
        let frame = compose(&tilted(), &CardLayout::default());
        let card_rotations: Vec<Rotation> = frame
            .card
            .iter()
            .filter_map(|op| match op {
                RenderOp::Rotate3d(r) => Some(*r),
                _ => None,
            })
            .collect();

        match frame.blob.last() {
            Some(RenderOp::MaskRoundedRect { rotations, .. }) => {
                assert_eq!(rotations, &card_rotations)
            }
            other => panic!("expected mask as last blob op, got {other:?}"),
        }
        assert!(frame
            .blob
            .contains(&RenderOp::Offset { x: 150.0, y: 16.0 }));
        assert!(frame.blob.contains(&RenderOp::Blur { radius: 40.0 }));
    }

    #[test]
    fn test_flat_state_composes_identity_rotations() {
        let frame = compose(&VisualState::ZERO, &CardLayout::default());
        for (_, op) in frame.ops() {
            match op {
                RenderOp::Rotate3d(r) => assert_eq!(r.degrees, 0.0),
                RenderOp::Offset { x, y } => assert_eq!((*x, *y), (0.0, 0.0)),
                _ => {}
            }
        }
    }

    #[test]
    fn test_command_log_records_frame() {
        let frame = compose(&tilted(), &CardLayout::default());
        let mut log = CommandLog::new();
        frame.render_to(&mut log).unwrap();

        assert_eq!(log.frames_presented(), 1);
        assert_eq!(log.commands().len(), frame.card.len() + frame.blob.len());
        assert_eq!(log.for_node(NodeId::Card).len(), 5);
        assert_eq!(log.for_node(NodeId::Blob).len(), 4);
        assert_eq!(log.commands()[0].0, NodeId::Card);
    }

    #[test]
    fn test_ops_serialize_tagged() {
        let json = serde_json::to_string(&RenderOp::Blur { radius: 40.0 }).unwrap();
        assert_eq!(json, r#"{"op":"blur","radius":40.0}"#);

        let fill = RenderOp::Fill {
            width: 350.0,
            height: 350.0,
            content_mode: ContentMode::Fit,
        };
        let json = serde_json::to_string(&fill).unwrap();
        assert_eq!(
            json,
            r#"{"op":"fill","width":350.0,"height":350.0,"content_mode":"fit"}"#
        );
    }
}
