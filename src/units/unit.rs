//! Unit - a worker walking the grid with a job and an inventory

use serde::{Deserialize, Serialize};

use crate::city::stockpile::Inventory;
use crate::core::types::{Item, TilePosition, UnitId};

/// Why a unit is heading somewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Errand {
    /// Cut wood from a tree
    Harvest,
    /// Finish a construction site
    Build,
    /// Tear down a building marked for destruction
    Demolish,
    /// Unload carried goods into storage
    Deposit,
    /// Load goods from storage
    Pickup(Item),
    /// Hand goods to a construction site
    Deliver(Item),
    /// Walk back to the job tile with nothing to do
    ReturnToJob,
}

impl Errand {
    /// Errands that take several ticks of work once the unit arrives
    pub fn is_timed(&self) -> bool {
        matches!(self, Errand::Harvest | Errand::Build | Errand::Demolish)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Errand::Harvest => "harvest",
            Errand::Build => "build",
            Errand::Demolish => "demolish",
            Errand::Deposit => "deposit",
            Errand::Pickup(_) => "pickup",
            Errand::Deliver(_) => "deliver",
            Errand::ReturnToJob => "return",
        }
    }
}

/// Current step of a unit's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activity {
    /// Nothing planned; the role decides again next tick
    #[default]
    Idle,
    Travel {
        target: TilePosition,
        errand: Errand,
    },
    Work {
        target: TilePosition,
        errand: Errand,
        progress: u32,
    },
}

impl Activity {
    pub fn target(&self) -> Option<TilePosition> {
        match self {
            Activity::Idle => None,
            Activity::Travel { target, .. } | Activity::Work { target, .. } => Some(*target),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Activity::Idle => "idle",
            Activity::Travel { .. } => "travel",
            Activity::Work { errand, .. } => errand.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Assigned by the manager on insertion
    pub id: UnitId,
    pub position: TilePosition,
    /// Grid index of the job tile
    pub job: Option<usize>,
    pub inventory: Inventory,
    pub activity: Activity,
    /// Construction site a logistician is currently supplying
    pub destination: Option<TilePosition>,
}

impl Unit {
    pub fn new(position: TilePosition) -> Self {
        Self {
            id: UnitId(0),
            position,
            job: None,
            inventory: Inventory::new(),
            activity: Activity::Idle,
            destination: None,
        }
    }

    pub fn with_job(mut self, job: usize) -> Self {
        self.job = Some(job);
        self
    }

    pub fn with_item(mut self, item: Item, amount: u32) -> Self {
        self.inventory.add(item, amount);
        self
    }

    pub fn is_idle(&self) -> bool {
        self.activity == Activity::Idle
    }

    /// Drop the job and whatever the unit was doing for it
    pub fn clear_job(&mut self) {
        self.job = None;
        self.activity = Activity::Idle;
        self.destination = None;
    }
}
