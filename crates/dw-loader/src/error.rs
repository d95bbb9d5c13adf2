//! Loader error taxonomy.
//!
//! Message strings are part of the contract: level authors (and the agents
//! driving them) see these verbatim.

use thiserror::Error;

use dw_world::ItemError;

/// Errors raised while parsing and validating a level document.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The input could not be read from disk.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not parseable as the named format, or did not fit the
    /// document shape.
    #[error("invalid {0} format: {1}")]
    InvalidDocument(&'static str, String),

    /// A required top-level field is absent.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A top-level field outside the schema was present.
    #[error("unexpected field: {0}")]
    UnexpectedField(String),

    /// A required field was present but empty.
    #[error("field '{field}' must be a non-empty {expected}")]
    EmptyField {
        field: String,
        expected: &'static str,
    },

    /// A floor declared no rooms.
    #[error("floor '{0}' has no rooms")]
    EmptyFloor(String),

    /// An item declared an illegal capability combination.
    #[error("invalid item {name}: {source}")]
    InvalidItem {
        name: String,
        #[source]
        source: ItemError,
    },

    /// A locked door must name exactly one unlock mechanism.
    #[error("door '{0}' must have exactly one of required_key_name or code")]
    InvalidDoorLock(String),

    /// `latched_from` must name one of the door's sides.
    #[error("door '{door}' latched_from must be 'room_a' or 'room_b', got '{value}'")]
    InvalidLatchSide { door: String, value: String },

    /// A door endpoint names a room that does not exist.
    #[error("door '{door}' references unknown room: {room}")]
    UnknownDoor { door: String, room: String },

    /// An event used a kind outside the schema.
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    /// A container's `contains` field held something other than an item or
    /// the literal string `"empty"`.
    #[error("invalid container contents on item '{0}'")]
    InvalidContainerContents(String),

    /// Rooms exist that cannot be reached from the starting room.
    #[error("unreachable rooms found: [{}]", .0.join(", "))]
    UnreachableRooms(Vec<String>),
}
