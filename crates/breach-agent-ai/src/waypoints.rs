//! Waypoint chain: entrance, first room, and the final-room candidates.
//!
//! The chain is built once from an externally supplied anchor table. A
//! missing anchor leaves its slot empty, which halts any agent that needs it.

use std::collections::BTreeMap;

use glam::Vec3;
use rand::Rng;

use breach_core::config::RouteNames;
use breach_core::enums::AgentStage;

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaypointChain {
    pub entrance: Option<Waypoint>,
    pub first_room: Option<Waypoint>,
    /// Candidate slots; unresolved names stay in place as `None`.
    pub final_rooms: Vec<Option<Waypoint>>,
}

impl WaypointChain {
    pub fn new(
        entrance: Option<Waypoint>,
        first_room: Option<Waypoint>,
        final_rooms: Vec<Option<Waypoint>>,
    ) -> Self {
        Self {
            entrance,
            first_room,
            final_rooms,
        }
    }

    /// Resolve the route names against the anchor table.
    pub fn resolve(anchors: &BTreeMap<String, Vec3>, route: &RouteNames) -> Self {
        let lookup = |name: &str| -> Option<Waypoint> {
            match anchors.get(name) {
                Some(&position) => Some(Waypoint::new(name, position)),
                None => {
                    log::warn!("Waypoint anchor '{name}' not found; agents will halt there");
                    None
                }
            }
        };

        let chain = Self {
            entrance: lookup(&route.entrance),
            first_room: lookup(&route.first_room),
            final_rooms: route.final_rooms.iter().map(|n| lookup(n)).collect(),
        };
        if chain.final_rooms.is_empty() {
            log::warn!("No final-room candidates configured");
        }
        chain
    }

    /// Target for an agent in `stage`, given its final-room choice.
    /// `None` means there is nowhere to go.
    pub fn target(&self, stage: AgentStage, final_room: Option<usize>) -> Option<&Waypoint> {
        match stage {
            AgentStage::SeekingEntrance => self.entrance.as_ref(),
            AgentStage::SeekingFirstRoom => self.first_room.as_ref(),
            AgentStage::SeekingFinalRoom | AgentStage::Settled => {
                final_room.and_then(|i| self.final_rooms.get(i)?.as_ref())
            }
        }
    }

    /// Pick a final-room slot uniformly at random. `None` if there are no candidates.
    pub fn choose_final_room<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.final_rooms.is_empty() {
            return None;
        }
        Some(rng.gen_range(0..self.final_rooms.len()))
    }

    /// Name of a final-room slot, if it resolved.
    pub fn final_room_name(&self, index: usize) -> Option<&str> {
        self.final_rooms
            .get(index)
            .and_then(|slot| slot.as_ref())
            .map(|w| w.name.as_str())
    }
}
