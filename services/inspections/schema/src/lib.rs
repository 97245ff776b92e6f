//! sea-orm entities for the inspections database, one module per table.

pub mod agencies;
pub mod campaigns;
pub mod gaz;
pub mod leak_statuses;
pub mod leaks;
pub mod severities;
pub mod users;
