//! Outbound ports - Interfaces that the application requires from external systems

mod catalog_port;
mod clock_port;
mod repository_port;

pub use catalog_port::CatalogPort;
pub use clock_port::ClockPort;
pub use repository_port::{
    ActionEvent, ActionEventKind, CharacterRepositoryPort, EventLogPort, RowLease,
    SocialGroupPort, WorldObjectRepositoryPort,
};
