use std::fmt;

/// Reasons a placement operation declines
///
/// All of these are recoverable: the operation returns the reason, state
/// stays as it was (a held item stays held), and user-facing variants map
/// to a warning message key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementDenied {
    /// Held item's type isn't in the target weapon's ammo list
    IncompatibleAmmo,

    /// Target weapon already has something loaded
    AlreadyLoaded,

    /// The action-cost checker refused the spend
    InsufficientTimeUnits,

    /// Footprint doesn't fit: cells missing or occupied
    NoFit,

    /// Target container id unknown to the layout registry
    InvalidContainer,

    /// Item id doesn't exist in the registry
    InvalidItem(String),
}

impl PlacementDenied {
    /// Localized message key to surface for this denial, if any.
    ///
    /// Container/item id problems stay silent; they are caller mistakes,
    /// not something the player can act on.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            PlacementDenied::IncompatibleAmmo => {
                Some("STR_WRONG_AMMUNITION_FOR_THIS_WEAPON")
            }
            PlacementDenied::AlreadyLoaded => Some("STR_WEAPON_IS_ALREADY_LOADED"),
            PlacementDenied::InsufficientTimeUnits => Some("STR_NOT_ENOUGH_TIME_UNITS"),
            PlacementDenied::NoFit => Some("STR_NOT_ENOUGH_SPACE"),
            PlacementDenied::InvalidContainer => None,
            PlacementDenied::InvalidItem(_) => None,
        }
    }
}

impl fmt::Display for PlacementDenied {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlacementDenied::IncompatibleAmmo => {
                write!(f, "Wrong ammunition for this weapon")
            }
            PlacementDenied::AlreadyLoaded => {
                write!(f, "Weapon is already loaded")
            }
            PlacementDenied::InsufficientTimeUnits => {
                write!(f, "Not enough time units")
            }
            PlacementDenied::NoFit => {
                write!(f, "Item does not fit there")
            }
            PlacementDenied::InvalidContainer => {
                write!(f, "No such container")
            }
            PlacementDenied::InvalidItem(id) => {
                write!(f, "Invalid item ID: {}", id)
            }
        }
    }
}

impl std::error::Error for PlacementDenied {}

impl From<PlacementDenied> for String {
    fn from(error: PlacementDenied) -> Self {
        error.to_string()
    }
}
