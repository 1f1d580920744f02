//! Display names for the default 18-location rotation.

/// Names of the default rotation's locations, indexed by location.
pub const DEFAULT_LOCATION_NAMES: [&str; 18] = [
    "Doric's House",
    "Yanille",
    "Draynor",
    "Rimmington",
    "Grand Exchange",
    "Farming Guild",
    "Hosidius",
    "Harmony Island",
    "Gwenith",
    "Catherby",
    "Tree Gnome Stronghold",
    "Brimhaven",
    "Mos Le'Harmless",
    "Taverley",
    "Lumbridge Mill",
    "East Ardougne",
    "South of Varrock",
    "Miscellania",
];

/// Name of a location in the default rotation, if it has one.
///
/// Rings configured with a different location count still work; locations
/// past the end of the table simply have no name.
pub fn location_name(location: u32) -> Option<&'static str> {
    DEFAULT_LOCATION_NAMES.get(location as usize).copied()
}
