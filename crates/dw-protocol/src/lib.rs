//! Wire contracts for the Darkwell engine.
//!
//! Typed, serde-serializable request and response records for every verb
//! operation, plus the session CRUD records the transport exposes. The
//! contract is protocol-agnostic (JSON over HTTP is one binding), and the
//! engine's error taxonomy maps onto a small classification enum here
//! rather than leaking transport status codes into the core.

pub mod error;
pub mod ids;
pub mod requests;
pub mod responses;
pub mod session;

pub use error::{ErrorBody, ErrorKind};
pub use ids::SessionId;
pub use requests::{
    BattleRequest, CombineRequest, CreateSessionRequest, HealRequest, InspectRequest,
    SearchRequest, TakeRequest, TraverseRequest, UncoverRequest, UnlockRequest, UseRequest,
};
pub use responses::{
    AmmoCountDto, BattleResponse, CombineResponse, DebugResponse, DoorDto, HealResponse,
    InspectResponse, InventoryResponse, ItemDto, MinimapResponse, ObserveResponse, SearchResponse,
    StateDto, TakeResponse, TraverseResponse, UncoverResponse, UnlockResponse, UseResponse,
};
pub use session::{
    CreateSessionResponse, DeleteSessionResponse, GetSessionResponse, ListSessionsResponse,
    Session,
};
