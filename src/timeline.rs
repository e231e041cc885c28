//! Timeline object derivation.
//!
//! Hitsound tooling works on discrete sub-events rather than whole hit
//! objects: a slider is a head, its repeat nodes and a tail, each carrying
//! its own resolved sample. Derivation is a pure function over a hit
//! object; events keep a non-owning back-reference (object index plus edge
//! role) and write resolved hitsounds back through an explicit `&mut`
//! borrow of their origin.

use thiserror::Error;

use crate::osu::{
    hit_object::{HitObject, HitObjectKind},
    model::Beatmap,
    sample::{EdgeSet, HitSample, Hitsound},
};

/// Which edge of its origin object an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeRole {
    /// The single hit of a circle.
    CircleHit,
    /// Node `n` of a slider: `0` is the head, the last node the tail.
    SliderNode(u32),
    /// The silent start of a spinner.
    SpinnerStart,
    /// The scored end of a spinner.
    SpinnerEnd,
    /// The audible press of a hold note.
    HoldStart,
    /// The silent release of a hold note.
    HoldRelease,
}

impl EdgeRole {
    const fn name(self) -> &'static str {
        match self {
            Self::CircleHit => "circle hit",
            Self::SliderNode(_) => "slider node",
            Self::SpinnerStart => "spinner start",
            Self::SpinnerEnd => "spinner end",
            Self::HoldStart => "hold start",
            Self::HoldRelease => "hold release",
        }
    }
}

/// Non-owning back-reference from a timeline event to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineOrigin {
    /// Index of the origin in [`Beatmap::hit_objects`].
    pub object_index: usize,
    /// Which edge of the origin this event is.
    pub role: EdgeRole,
}

/// A discrete audible or silent sub-event derived from a hit object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineObject {
    /// Event time in milliseconds.
    pub time: f64,
    /// Hitsound flags resolved for this edge.
    pub hitsound: Hitsound,
    /// Sample descriptor resolved for this edge.
    pub sample: HitSample,
    /// Whether this event carries audible hitsound data.
    pub has_hitsound: bool,
    /// Whether per-node custom sample overrides are permitted here.
    pub can_customs: bool,
    /// Back-reference to the owning hit object.
    pub origin: TimelineOrigin,
}

/// An illegal write-back: the event and its claimed origin don't fit.
/// A programmer error, never retried.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum InvalidStateError {
    /// The event is a silent placeholder with nothing to write.
    #[error("a {role} event carries no hitsound to write back")]
    SilentEvent {
        /// Role of the offending event.
        role: &'static str,
    },
    /// The event role belongs to a different object variant.
    #[error("a {role} event cannot write onto a {found} object")]
    MismatchedOrigin {
        /// Role of the offending event.
        role: &'static str,
        /// Variant of the object that was passed.
        found: &'static str,
    },
    /// The slider node index exceeds the origin's node count.
    #[error("slider node {node} does not exist on a slider with {nodes} nodes")]
    NodeOutOfRange {
        /// The event's node index.
        node: u32,
        /// Node count of the slider that was passed.
        nodes: u32,
    },
}

impl TimelineObject {
    /// Copies this event's resolved hitsound and sample back onto its
    /// origin: the object's own fields for circle hits, hold starts and
    /// spinner ends, the per-node edge lists (materializing them if the
    /// file omitted them) for slider nodes.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidStateError`] for silent placeholder events and
    /// for origins of the wrong variant.
    pub fn write_hitsounds_to_origin(
        &self,
        origin: &mut HitObject,
    ) -> Result<(), InvalidStateError> {
        match (self.origin.role, &mut origin.kind) {
            (EdgeRole::CircleHit, HitObjectKind::Circle)
            | (EdgeRole::HoldStart, HitObjectKind::Hold { .. })
            | (EdgeRole::SpinnerEnd, HitObjectKind::Spinner { .. }) => {
                origin.hitsound = self.hitsound;
                origin.sample = Some(self.sample.clone());
                Ok(())
            }
            (EdgeRole::SliderNode(node), HitObjectKind::Slider(slider)) => {
                let nodes = slider.node_count();
                if node >= nodes {
                    return Err(InvalidStateError::NodeOutOfRange { node, nodes });
                }
                let default_hitsound = origin.hitsound;
                let hitsounds = slider
                    .edge_hitsounds
                    .get_or_insert_with(|| vec![default_hitsound; nodes as usize]);
                hitsounds.resize(nodes as usize, default_hitsound);
                hitsounds[node as usize] = self.hitsound;

                let sets = slider
                    .edge_sets
                    .get_or_insert_with(|| vec![EdgeSet::default(); nodes as usize]);
                sets.resize(nodes as usize, EdgeSet::default());
                sets[node as usize] = EdgeSet {
                    sample_set: self.sample.sample_set,
                    addition_set: self.sample.addition_set,
                };
                Ok(())
            }
            (role @ (EdgeRole::SpinnerStart | EdgeRole::HoldRelease), _) => {
                Err(InvalidStateError::SilentEvent { role: role.name() })
            }
            (role, kind) => Err(InvalidStateError::MismatchedOrigin {
                role: role.name(),
                found: variant_name(kind),
            }),
        }
    }
}

const fn variant_name(kind: &HitObjectKind) -> &'static str {
    match kind {
        HitObjectKind::Circle => "circle",
        HitObjectKind::Slider(_) => "slider",
        HitObjectKind::Spinner { .. } => "spinner",
        HitObjectKind::Hold { .. } => "hold note",
    }
}

/// Derives the ordered sub-events of one hit object. `span_duration` is
/// the arc-length-derived duration of one slider span and is ignored for
/// the other variants.
#[must_use]
pub fn for_hit_object(
    object: &HitObject,
    object_index: usize,
    span_duration: f64,
) -> Vec<TimelineObject> {
    let origin = |role| TimelineOrigin { object_index, role };
    match &object.kind {
        HitObjectKind::Circle => vec![TimelineObject {
            time: object.time,
            hitsound: object.hitsound,
            sample: object.sample_or_default(),
            has_hitsound: true,
            can_customs: true,
            origin: origin(EdgeRole::CircleHit),
        }],
        HitObjectKind::Slider(slider) => (0..slider.node_count())
            .map(|node| {
                let hitsound = slider
                    .edge_hitsounds
                    .as_ref()
                    .and_then(|edges| edges.get(node as usize))
                    .copied()
                    .unwrap_or(object.hitsound);
                let mut sample = object.sample_or_default();
                if let Some(set) = slider
                    .edge_sets
                    .as_ref()
                    .and_then(|edges| edges.get(node as usize))
                {
                    sample.sample_set = set.sample_set;
                    sample.addition_set = set.addition_set;
                }
                TimelineObject {
                    time: object.time + span_duration * f64::from(node),
                    hitsound,
                    sample,
                    has_hitsound: true,
                    // The tail plays a hitsound but takes no per-node
                    // custom overrides.
                    can_customs: node + 1 < slider.node_count(),
                    origin: origin(EdgeRole::SliderNode(node)),
                }
            })
            .collect(),
        HitObjectKind::Spinner { end_time } => vec![
            TimelineObject {
                time: object.time,
                hitsound: Hitsound::default(),
                sample: HitSample::default(),
                has_hitsound: false,
                can_customs: false,
                origin: origin(EdgeRole::SpinnerStart),
            },
            TimelineObject {
                time: *end_time,
                hitsound: object.hitsound,
                sample: object.sample_or_default(),
                has_hitsound: true,
                can_customs: true,
                origin: origin(EdgeRole::SpinnerEnd),
            },
        ],
        HitObjectKind::Hold { end_time } => vec![
            TimelineObject {
                time: object.time,
                hitsound: object.hitsound,
                sample: object.sample_or_default(),
                has_hitsound: true,
                can_customs: true,
                origin: origin(EdgeRole::HoldStart),
            },
            TimelineObject {
                time: *end_time,
                hitsound: Hitsound::default(),
                sample: HitSample::default(),
                has_hitsound: false,
                can_customs: false,
                origin: origin(EdgeRole::HoldRelease),
            },
        ],
    }
}

/// Derives the full timeline of a beatmap, ordered by time (file order
/// breaks ties), with slider node times taken from the map's timing.
#[must_use]
pub fn timeline_objects(beatmap: &Beatmap) -> Vec<TimelineObject> {
    let mut events: Vec<TimelineObject> = beatmap
        .hit_objects
        .iter()
        .enumerate()
        .flat_map(|(index, object)| {
            let span_duration = match &object.kind {
                HitObjectKind::Slider(slider) => beatmap
                    .slider_span_duration(slider.pixel_length, object.time)
                    .unwrap_or(0.0),
                _ => 0.0,
            };
            for_hit_object(object, index, span_duration)
        })
        .collect();
    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    events
}
