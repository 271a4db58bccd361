//! Data Transfer Objects (DTOs) for HTTP API contract.
//!
//! These types define the JSON clients see. They decouple the domain types
//! from the wire: references become nested objects or resource URIs, every
//! record carries its `resource_uri`, and lists share one envelope.

pub mod campaign;
pub mod list;
pub mod phonebook;
pub mod resources;

pub use campaign::{CampaignDto, CampaignFields, MyCampaignDto, RatingDto};
pub use list::{ListMeta, ListResponse, PageQuery};
pub use phonebook::PhonebookDto;
pub use resources::{CallResponseDto, DialRequest, GatewayDto, UserDto, VoipAppDto};
