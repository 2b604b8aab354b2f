pub mod auth;
pub mod competition;
pub mod competition_registration;
pub mod portfolio;
pub mod root;
pub mod service_lead;
pub mod user;
pub mod workshop;
pub mod workshop_registration;
