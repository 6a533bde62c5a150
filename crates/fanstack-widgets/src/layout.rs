#![forbid(unsafe_code)]

//! Card placement.
//!
//! [`compute_layout`] is a pure function of the navigator state and the
//! presentation config. Hosts animate from the previous layout to the new
//! one with the [`Spring`] parameters; the navigator itself never animates.
//!
//! Placement rules, for a card at offset `off` from the active card:
//!
//! | Quantity | Value |
//! |----------|-------|
//! | `x` | `off * card_spacing` |
//! | `y` | `|off| * 10` plus the lift on the active card |
//! | `rotate_z` | `off * spread_deg / max_offset` |
//! | `depth_z` | `-|off| * depth_px` |
//! | `z_index` | `100 - |off|` |

use crate::card_stack::{CardStackConfig, CardStackState, max_offset};

/// Vertical step between successive cards, in px.
const Y_STEP_PX: f32 = 10.0;
/// Extra drop applied to the entrance pose, in px.
const ENTRANCE_DROP_PX: f32 = 40.0;
/// Minimum horizontal spacing between cards, in px.
const MIN_CARD_SPACING_PX: f32 = 10.0;
/// Minimum stage height, in px.
const MIN_STAGE_HEIGHT_PX: f32 = 380.0;
/// Room reserved above the cards for the lift and tilt, in px.
const STAGE_HEADROOM_PX: f32 = 80.0;

/// Visual transform of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub x: f32,
    pub y: f32,
    pub rotate_z: f32,
    pub rotate_x: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Spring used to animate between poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
}

/// One visible card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPlacement {
    /// Absolute index into the item list.
    pub index: usize,
    /// Signed distance from the active card.
    pub offset: i64,
    pub active: bool,
    /// Resting pose.
    pub pose: CardPose,
    /// Pose a newly shown card animates in from. `None` under reduced motion.
    pub entrance: Option<CardPose>,
    /// Translation along the view axis, in px (negative is further away).
    pub depth_z: f32,
    pub z_index: i32,
    /// Only the active card accepts drags.
    pub draggable: bool,
}

/// A pagination dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotState {
    pub index: usize,
    pub active: bool,
    /// Accessible label, e.g. `"Go to Rust certificate"`.
    pub label: String,
}

/// Everything a host needs to draw the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    /// Visible cards in item order.
    pub cards: Vec<CardPlacement>,
    /// Empty when dots are disabled or there are no items.
    pub dots: Vec<DotState>,
    /// The active card's link, shown next to the dots.
    pub link: Option<String>,
    pub stage_height: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub perspective_px: f32,
    pub card_spacing: f32,
    pub step_deg: f32,
    pub spring: Spring,
}

impl StackLayout {
    /// Whether nothing should be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The active card's placement.
    #[must_use]
    pub fn active(&self) -> Option<&CardPlacement> {
        self.cards.iter().find(|c| c.active)
    }

    /// Placements sorted back-to-front.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&CardPlacement> {
        let mut ordered: Vec<&CardPlacement> = self.cards.iter().collect();
        ordered.sort_by_key(|c| c.z_index);
        ordered
    }

    /// Absolute index of the top-most card under stage-relative `x` (px,
    /// 0 at the stage centre).
    #[must_use]
    pub fn hit_test(&self, x: f32) -> Option<usize> {
        self.cards
            .iter()
            .filter(|c| {
                let half = self.card_width * c.pose.scale / 2.0;
                x >= c.pose.x - half && x <= c.pose.x + half
            })
            .max_by_key(|c| c.z_index)
            .map(|c| c.index)
    }
}

/// Compute placements for every visible card.
#[must_use]
pub fn compute_layout(state: &CardStackState, config: &CardStackConfig) -> StackLayout {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "card_stack_layout",
        len = state.len(),
        active = ?state.active_index(),
        max_visible = state.max_visible()
    )
    .entered();

    let max_off = max_offset(state.max_visible());
    let card_spacing = (config.card_width * (1.0 - config.overlap))
        .round()
        .max(MIN_CARD_SPACING_PX);
    let step_deg = if max_off > 0 {
        config.spread_deg / max_off as f32
    } else {
        0.0
    };
    let reduced = state.reduced_motion();

    let cards = (0..state.len())
        .filter(|&i| state.is_visible(i))
        .map(|i| {
            let offset = state.offset_of(i);
            let abs = offset.unsigned_abs() as f32;
            let off = offset as f32;
            let active = offset == 0;

            let x = off * card_spacing;
            let y = abs * Y_STEP_PX;
            let rotate_z = off * step_deg;
            let (scale, lift, rotate_x) = if active {
                (config.active_scale, -config.active_lift_px, 0.0)
            } else {
                (config.inactive_scale, 0.0, config.tilt_x_deg)
            };

            let entrance = (!reduced).then_some(CardPose {
                x,
                y: y + ENTRANCE_DROP_PX,
                rotate_z,
                rotate_x,
                scale,
                opacity: 0.0,
            });

            CardPlacement {
                index: i,
                offset,
                active,
                pose: CardPose {
                    x,
                    y: y + lift,
                    rotate_z,
                    rotate_x,
                    scale,
                    opacity: 1.0,
                },
                entrance,
                depth_z: -abs * config.depth_px,
                z_index: 100 - offset.unsigned_abs().min(100) as i32,
                draggable: active,
            }
        })
        .collect();

    let dots = if config.show_dots {
        state
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| DotState {
                index,
                active: Some(index) == state.active_index(),
                label: format!("Go to {}", item.title),
            })
            .collect()
    } else {
        Vec::new()
    };

    let link = if config.show_dots {
        state.active_item().and_then(|item| item.href.clone())
    } else {
        None
    };

    StackLayout {
        cards,
        dots,
        link,
        stage_height: (config.card_height + STAGE_HEADROOM_PX).max(MIN_STAGE_HEIGHT_PX),
        card_width: config.card_width,
        card_height: config.card_height,
        perspective_px: config.perspective_px,
        card_spacing,
        step_deg,
        spring: Spring {
            stiffness: config.spring_stiffness,
            damping: config.spring_damping,
        },
    }
}
